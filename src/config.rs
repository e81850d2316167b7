//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The application name sent to the server in the `User-Agent` header.
/// Feel free to override it when initing this library.
pub static APP_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("tasksync".to_string())));

/// The `User-Agent` value requests carry: the (overridable) application name and the crate version
pub(crate) fn user_agent() -> String {
    format!("{}/{}", APP_NAME.lock().unwrap(), env!("CARGO_PKG_VERSION"))
}
