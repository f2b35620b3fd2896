pub mod api;
pub mod form;
pub mod health;

pub use api::generate_video_api;
pub use form::{show_form, submit_form};
pub use health::health_check;
