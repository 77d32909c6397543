use crate::error::AssetError;
use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use std::future::Future;
use wasm_bindgen::closure::{Closure, WasmClosure, WasmClosureFnOnce};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[rustfmt::skip]
use web_sys::{
    Document,
    Window,
    CanvasRenderingContext2d,
    HtmlCanvasElement,
    HtmlImageElement,
    Response,
};

// ==================== Constants ====================
// Constants related to HTML elements
mod html {
    pub const CANVAS_ID: &str = "world-canvas";
    pub const CONTEXT_2D: &str = "2d";
}

// ==================== Logging ====================
macro_rules! log {
    ($($t:tt)*) => {
        web_sys::console::log_1(&format!($($t)*).into())
    };
}

macro_rules! warn {
    ($($t:tt)*) => {
        web_sys::console::warn_1(&format!($($t)*).into())
    };
}

macro_rules! error {
    ($($t:tt)*) => {
        web_sys::console::error_1(&format!($($t)*).into())
    };
}

pub type LoopClosure = Closure<dyn FnMut(f64)>;

pub fn create_html_image_element() -> Result<HtmlImageElement> {
    HtmlImageElement::new()
        .map_err(|err| anyhow!("Could not create image element : {:#?}", err))
}

pub fn context() -> Result<CanvasRenderingContext2d> {
    canvas()?
        .get_context(html::CONTEXT_2D)
        // Result<Option<Object>, JsValue>
        // - JsValue error -> anyhow
        // - None -> anyhow
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

pub fn canvas() -> Result<HtmlCanvasElement> {
    document()?
        .get_element_by_id(html::CANVAS_ID)
        .ok_or_else(|| anyhow!("No Canvas Element found with ID : '{}'", html::CANVAS_ID))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlCanvasElement", element))
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

pub fn now() -> Result<f64> {
    Ok(window()?
        .performance()
        .ok_or_else(|| anyhow!("Performance object not found"))?
        .now())
}

pub fn closure_once<F, T, A, R>(f: F) -> Closure<T>
where
    T: ?Sized + WasmClosure,
    F: 'static + WasmClosureFnOnce<T, A, R> + wasm_bindgen::__rt::marker::MaybeUnwindSafe,
{
    Closure::once(f)
}

pub fn closure_wrap<T: WasmClosure + ?Sized>(data: Box<T>) -> Closure<T> {
    Closure::wrap(data)
}

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    closure_wrap(Box::new(f))
}

pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame {:#?}", err))
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Fetch `json_path` and decode the body into `T`
/// - non-success status -> `AssetError::Fetch`
/// - malformed body -> `AssetError::Parse`
pub async fn fetch_json<T>(json_path: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let resp_value = fetch_with_str(json_path).await?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;

    if !resp.ok() {
        return Err(AssetError::Fetch {
            url: json_path.to_string(),
            status: resp.status(),
        }
        .into());
    }

    let parse_error = |reason: String| AssetError::Parse {
        url: json_path.to_string(),
        reason,
    };

    let json = resp
        .json()
        .map_err(|err| parse_error(format!("{:?}", err)))?;
    let json_value = JsFuture::from(json)
        .await
        .map_err(|err| parse_error(format!("{:?}", err)))?;

    serde_wasm_bindgen::from_value(json_value).map_err(|err| parse_error(err.to_string()).into())
}

async fn fetch_with_str(resource: &str) -> Result<JsValue> {
    let resp = window()?.fetch_with_str(resource);

    // a rejected request never got a response, reported with status 0
    JsFuture::from(resp).await.map_err(|err| {
        anyhow::Error::from(AssetError::Fetch {
            url: resource.to_string(),
            status: 0,
        })
        .context(format!("error fetching {} : {:?}", resource, err))
    })
}
