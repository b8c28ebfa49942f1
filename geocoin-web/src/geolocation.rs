//! Browser geolocation watch feeding position fixes into the game.

use geocoin_game::GeoPoint;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported in this browser.")]
    Unsupported,
    #[error("Could not watch your position: {0}")]
    Watch(String),
}

fn number_field(value: &JsValue, name: &str) -> Option<f64> {
    js_sys::Reflect::get(value, &JsValue::from_str(name))
        .ok()?
        .as_f64()
}

/// Pull `coords.latitude` and `coords.longitude` out of a position object.
#[must_use]
pub fn position_from_js(position: &JsValue) -> Option<GeoPoint> {
    let coords = js_sys::Reflect::get(position, &JsValue::from_str("coords")).ok()?;
    let lat = number_field(&coords, "latitude")?;
    let lng = number_field(&coords, "longitude")?;
    (lat.is_finite() && lng.is_finite()).then(|| GeoPoint::new(lat, lng))
}

fn error_message(error: &JsValue) -> String {
    js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| dom::js_error_message(error))
}

/// An active `watchPosition` registration; dropping it stops the watch.
pub struct PositionWatch {
    id: i32,
    _on_fix: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

impl PositionWatch {
    /// Start watching the device position.
    ///
    /// # Errors
    /// Returns an error when the browser has no geolocation support or refuses
    /// to register the watch.
    pub fn start<F, E>(on_fix: F, on_error: E) -> Result<Self, GeolocationError>
    where
        F: Fn(GeoPoint) + 'static,
        E: Fn(String) + 'static,
    {
        let geolocation = dom::window()
            .and_then(|win| win.navigator().geolocation())
            .map_err(|_| GeolocationError::Unsupported)?;

        let on_fix = Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
            match position_from_js(&position) {
                Some(point) => on_fix(point),
                None => log::warn!("ignoring position fix without coordinates"),
            }
        });
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
            let message = error_message(&error);
            log::warn!("geolocation error: {message}");
            on_error(message);
        });

        let id = geolocation
            .watch_position_with_error_callback(
                on_fix.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
            )
            .map_err(|err| GeolocationError::Watch(dom::js_error_message(&err)))?;
        log::info!("geolocation watch {id} started");

        Ok(Self {
            id,
            _on_fix: on_fix,
            _on_error: on_error,
        })
    }
}

impl Drop for PositionWatch {
    fn drop(&mut self) {
        if let Ok(geolocation) = dom::window().and_then(|win| win.navigator().geolocation()) {
            geolocation.clear_watch(self.id);
            log::info!("geolocation watch {} cleared", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_message_matches_notice() {
        assert_eq!(
            GeolocationError::Unsupported.to_string(),
            "Geolocation is not supported in this browser."
        );
        assert!(
            GeolocationError::Watch("denied".into())
                .to_string()
                .ends_with("denied")
        );
    }
}
