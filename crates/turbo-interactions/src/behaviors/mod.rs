//! Page behaviors.
//!
//! Each behavior binds to its markup hooks once and then reacts to DOM
//! events on its own. Listeners and timers hold the document weakly, so
//! dropping the last `Rc` to a document releases everything bound to it.
//! Notification removal timers are the exception: a toast on screen keeps
//! its document alive until it has been taken down.

pub mod add_to_cart;
pub mod alerts;
pub mod cart_update;
pub mod image_zoom;
pub mod lazy_images;
pub mod notification;
pub mod quantity;
pub mod rating;
pub mod search;
pub mod smooth_scroll;
pub mod styles;
