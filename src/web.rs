// web.rs - Platform depth objects seen from Rust
//
// Wraps an `XRCPUDepthInformation`-shaped JS object. Exceptions thrown by
// `getDepthInMeters` come back as `DepthError::Query`.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::depth::DepthSource;
use crate::error::DepthError;

pub struct JsDepthInformation {
    info: JsValue,
    get_depth: Function,
    w: u32,
    h: u32,
}

impl JsDepthInformation {
    /// `None` for `null`/`undefined` or objects without a depth getter.
    pub fn from_js(info: JsValue) -> Option<Self> {
        if info.is_null() || info.is_undefined() {
            return None;
        }
        let get_depth = Reflect::get(&info, &JsValue::from_str("getDepthInMeters"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let w = dimension(&info, "width")?;
        let h = dimension(&info, "height")?;
        Some(Self { info, get_depth, w, h })
    }
}

fn dimension(info: &JsValue, key: &str) -> Option<u32> {
    let v = Reflect::get(info, &JsValue::from_str(key)).ok()?.as_f64()?;
    (v >= 0.0).then_some(v as u32)
}

impl DepthSource for JsDepthInformation {
    fn width(&self) -> u32 {
        self.w
    }

    fn height(&self) -> u32 {
        self.h
    }

    fn depth_at(&self, u: f32, v: f32) -> Result<f32, DepthError> {
        let out = self
            .get_depth
            .call2(&self.info, &JsValue::from_f64(u as f64), &JsValue::from_f64(v as f64))
            .map_err(|err| DepthError::Query(describe(&err)))?;
        // Non-numbers read as NaN, i.e. invalid depth
        Ok(out.as_f64().map_or(f32::NAN, |d| d as f32))
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
