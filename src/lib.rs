//! Layout engine for the badge editor.
//!
//! The crate owns the editable state of a badge template: the ordered list of
//! text slots, their undo/redo history, and the geometry that maps the fixed
//! 2480×3508 page onto whatever viewport the host draws into. The host layer
//! is responsible only for wiring pointer/keyboard events to the
//! [`interaction::Controller`], drawing the [`render::SlotView`]s it gets back,
//! and forwarding batch render requests to the server.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Editor store: slot history, selection, mode, mirroring |
//! | [`history`] | Generic past/present/future container |
//! | [`slot`] | Slot entity, sparse patches, default template |
//! | [`transform`] | Fit scale and real/screen coordinate conversions |
//! | [`hit`] | Hit-testing against slot boxes and handles |
//! | [`input`] | Modifier keys, key names, and the gesture state |
//! | [`interaction`] | Pointer/keyboard controller issuing store mutations |
//! | [`render`] | Screen-space scene description |
//! | [`persistence`] | Versioned layout persistence over a key-value store |
//! | [`batch`] | Batch render request planning |
//! | [`config`] | Environment configuration |
//! | [`logging`] | Tracing subscriber bootstrap |
//! | [`consts`] | Shared numeric constants and storage identifiers |

pub mod batch;
pub mod config;
pub mod consts;
pub mod hit;
pub mod history;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod persistence;
pub mod render;
pub mod slot;
pub mod store;
pub mod transform;
