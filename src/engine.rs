use crate::browser;
use crate::error::AssetError;
use anyhow::{anyhow, Error, Result};
// wasm is single threaded, Rc RefCell > Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{
    // unchecked_ref casts the closure to a js Function
    // - we create the closure and know its signature, so the cast holds
    JsCast,
    JsValue,
};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use self::input::KeyPress;

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    fn handle_key(&mut self, press: &KeyPress);
    /// `delta` is the elapsed time since the previous tick in milliseconds
    fn update(&mut self, delta: f64);
    fn draw(&self, renderer: &Renderer);
}

pub struct GameLoop {
    last_frame: f64,
}

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// Initialize `game`, then tick it once per display refresh forever
    /// - `key_filter` selects the key codes the game consumes
    pub async fn start(game: impl Game + 'static, key_filter: fn(&str) -> bool) -> Result<()> {
        let mut game = game.initialize().await?;
        let mut keyevent_receiver = input::prepare_input(key_filter)?;
        let mut game_loop = GameLoop {
            last_frame: browser::now()?,
        };
        let renderer = Renderer::new(browser::context()?);

        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            for press in input::drain(&mut keyevent_receiver) {
                game.handle_key(&press);
            }
            let delta = perf - game_loop.last_frame;
            game_loop.last_frame = perf;
            game.update(delta);
            game.draw(&renderer);

            if let Some(closure) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(closure) {
                    error!("GameLoop: {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Same center, shrunk by `inset` on every side
    pub fn inset(&self, inset: f64) -> Self {
        Rect {
            x: self.x + inset,
            y: self.y + inset,
            width: self.width - inset * 2.0,
            height: self.height - inset * 2.0,
        }
    }
}

pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.x, rect.y, rect.width, rect.height);
    }

    pub fn fill_rect(&self, rect: &Rect, color: &str) {
        self.context.set_fill_style_str(color);
        self.context
            .fill_rect(rect.x, rect.y, rect.width, rect.height);
    }

    pub fn draw_text(&self, text: &str, position: &Point, color: &str, font: &str) {
        self.context.set_fill_style_str(color);
        self.context.set_font(font);
        if let Err(err) = self.context.fill_text(text, position.x, position.y) {
            error!("Renderer: could not draw text {:#?}", err);
        }
    }

    pub fn draw_image(&self, image: &HtmlImageElement, frame: &Rect, destination: &Rect) {
        if let Err(err) = self.blit(image, frame, destination) {
            error!("Renderer: could not draw image {:#?}", err);
        }
    }

    /// Draw `image` mirrored horizontally about `pivot`
    /// - the context transform is always restored, even when drawing fails
    pub fn draw_image_flipped(
        &self,
        image: &HtmlImageElement,
        frame: &Rect,
        destination: &Rect,
        pivot: &Point,
    ) {
        self.context.save();
        let drawn = self
            .context
            .translate(pivot.x, pivot.y)
            .and_then(|_| self.context.scale(-1.0, 1.0))
            .and_then(|_| self.context.translate(-pivot.x, -pivot.y))
            .and_then(|_| self.blit(image, frame, destination));
        self.context.restore();

        if let Err(err) = drawn {
            error!("Renderer: could not draw flipped image {:#?}", err);
        }
    }

    fn blit(
        &self,
        image: &HtmlImageElement,
        frame: &Rect,
        destination: &Rect,
    ) -> std::result::Result<(), JsValue> {
        self.context
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                frame.x,
                frame.y,
                frame.width,
                frame.height,
                destination.x,
                destination.y,
                destination.width,
                destination.height,
            )
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err(AssetError::ImageDecode)` - on load fail, no retry
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();
    let url = source.to_string();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |_err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(AssetError::ImageDecode { url }.into()));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until image is loaded or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - outer ? : channel dropped
    // - inner ? : image failed to load
    rx.await??;

    Ok(image)
}

pub mod input {
    use crate::browser;
    use anyhow::Result;
    use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
    use wasm_bindgen::JsCast;
    use web_sys::KeyboardEvent;

    /// A key event, identified by its physical key code (`ArrowUp`, `KeyW` ...)
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum KeyPress {
        Down(String),
        Up(String),
    }

    impl KeyPress {
        pub fn code(&self) -> &str {
            match self {
                KeyPress::Down(code) | KeyPress::Up(code) => code,
            }
        }
    }

    /// Listen for key events on the window
    /// - codes accepted by `filter` have their default browser action suppressed
    ///   and are forwarded in arrival order
    pub fn prepare_input(filter: fn(&str) -> bool) -> Result<UnboundedReceiver<KeyPress>> {
        let (keydown_sender, keyevent_receiver) = unbounded();
        let keyup_sender = keydown_sender.clone();

        let onkeydown = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
            forward(&keydown_sender, &event, filter, KeyPress::Down);
        }) as Box<dyn FnMut(KeyboardEvent)>);

        let onkeyup = browser::closure_wrap(Box::new(move |event: KeyboardEvent| {
            forward(&keyup_sender, &event, filter, KeyPress::Up);
        }) as Box<dyn FnMut(KeyboardEvent)>);

        let window = browser::window()?;
        window.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
        window.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));
        onkeydown.forget();
        onkeyup.forget();

        Ok(keyevent_receiver)
    }

    fn forward(
        sender: &UnboundedSender<KeyPress>,
        event: &KeyboardEvent,
        filter: fn(&str) -> bool,
        press: fn(String) -> KeyPress,
    ) {
        let code = event.code();
        if !filter(&code) {
            return;
        }
        event.prevent_default();
        if sender.unbounded_send(press(code)).is_err() {
            warn!("input: key event dropped, receiver closed");
        }
    }

    /// Take every pending key event without waiting
    pub fn drain(receiver: &mut UnboundedReceiver<KeyPress>) -> Vec<KeyPress> {
        let mut presses = Vec::new();
        while let Ok(press) = receiver.try_recv() {
            presses.push(press);
        }
        presses
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn inset_shrinks_around_center() {
        let rect = Rect::new(64.0, 32.0, 32.0, 32.0).inset(32.0 * 0.2);
        assert_relative_eq!(rect.x, 70.4, epsilon = 1e-9);
        assert_relative_eq!(rect.y, 38.4, epsilon = 1e-9);
        assert_relative_eq!(rect.width, 19.2, epsilon = 1e-9);
        assert_relative_eq!(rect.height, 19.2, epsilon = 1e-9);
    }
}
