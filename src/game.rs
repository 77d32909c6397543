use crate::browser;
use crate::config::{self, TilesetBinding};
use crate::controls;
use crate::engine::{self, input::KeyPress, Game, Rect, Renderer};
use crate::render;
use crate::sprite::player::Player;
use crate::sprite::{self, FrameSet};
use crate::world::{spawn, Chunk};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::join;
use web_sys::HtmlImageElement;

/// ┌──────────────────────── Explorer Overview ──────────────────────────────┐
/// │                                                                         │
/// │  initialize()                                                           │
/// │    ├─► tileset binding (best effort, falls back to 32px tiles)          │
/// │    ├─► chunk + sprite sheet (in parallel, any failure aborts)           │
/// │    ├─► sprite sheet ─► FrameSet                                         │
/// │    └─► chunk ─► spawn ─► Player                                         │
/// │                                                                         │
/// │  every tick (GameLoop)                                                  │
/// │    ├─► handle_key()  for each pending key event                         │
/// │    ├─► update(delta) walk cycle                                         │
/// │    └─► draw()        map, then player                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
pub enum Explorer {
    /// Resources are being fetched
    Loading,

    /// Chunk, sprite and player are ready
    Loaded(View),
}

/// Everything one tick reads or mutates
pub struct View {
    chunk: Chunk,
    tile_size: u32,
    side: u32,
    sprite: HtmlImageElement,
    frames: FrameSet,
    player: Player,
}

impl Explorer {
    pub fn new() -> Self {
        Explorer::Loading
    }

    /// Tileset binding at `path`; any failure is logged and yields the defaults
    pub async fn load_binding(path: &str) -> TilesetBinding {
        match browser::fetch_json::<TilesetBinding>(path).await {
            Ok(binding) => binding,
            Err(err) => {
                warn!(
                    "Could not load tileset binding, using default tile size : {:#}",
                    err
                );
                TilesetBinding::default()
            }
        }
    }

    async fn load_chunk() -> Result<Chunk> {
        let url = config::chunk_url(config::START_CHUNK);
        browser::fetch_json::<Chunk>(&url)
            .await
            .with_context(|| format!("Failed to load chunk from : {}", url))?
            .validated(&url)
    }

    async fn load_sprite_image() -> Result<HtmlImageElement> {
        engine::load_image(config::SPRITE_PATH)
            .await
            .with_context(|| {
                format!(
                    "Failed to load sprite sheet from : {}",
                    config::SPRITE_PATH
                )
            })
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Explorer::new()
    }
}

#[async_trait(?Send)]
impl Game for Explorer {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Explorer::Loading => {
                let tile_size = Self::load_binding(config::BINDING_PATH).await.tile_size();
                let (chunk_result, sprite_result) =
                    join!(Self::load_chunk(), Self::load_sprite_image());
                let chunk = chunk_result?;
                let sprite = sprite_result?;

                let side = config::surface_side(chunk.size, tile_size)?;
                let canvas = browser::canvas()?;
                canvas.set_width(side);
                canvas.set_height(side);

                let frames = sprite::create_frame_sets(sprite.natural_width(), sprite.natural_height());
                let start = spawn::find_spawn(&chunk);
                log!(
                    "Explorer: chunk {}x{} at {}px tiles, spawn ({}, {})",
                    chunk.size,
                    chunk.size,
                    tile_size,
                    start.x,
                    start.y
                );

                Ok(Box::new(Explorer::Loaded(View {
                    chunk,
                    tile_size,
                    side,
                    sprite,
                    frames,
                    player: Player::new(start),
                })))
            }
            Explorer::Loaded(_) => Err(anyhow!("Explorer is already initialized")),
        }
    }

    fn handle_key(&mut self, press: &KeyPress) {
        if let Explorer::Loaded(view) = self {
            controls::apply(press, &mut view.player, &view.chunk, &view.frames);
        }
    }

    fn update(&mut self, delta: f64) {
        if let Explorer::Loaded(view) = self {
            view.player.update(delta, &view.frames);
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let Explorer::Loaded(view) = self {
            let side = view.side as f64;
            let tile_size = view.tile_size as f64;
            renderer.clear(&Rect::new(0.0, 0.0, side, side));
            // map first, player on top
            render::draw_map(renderer, &view.chunk, tile_size);
            render::draw_player(renderer, &view.sprite, &view.frames, &view.player, tile_size);
        }
    }
}
