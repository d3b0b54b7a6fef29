//! Shared numeric constants for the badge layout crate.

// ── Page ────────────────────────────────────────────────────────

/// Width of the logical page in real units (A4 at 300 DPI).
pub const REAL_W: i32 = 2480;

/// Height of the logical page in real units (A4 at 300 DPI).
pub const REAL_H: i32 = 3508;

/// Fraction of the container the fitted page may occupy.
pub const FIT_MARGIN: f64 = 0.95;

/// Scale used until the host reports a usable viewport.
pub const INITIAL_SCALE: f64 = 0.2;

// ── Fonts ───────────────────────────────────────────────────────

/// Smallest font size any mutation may store.
pub const FONT_MIN: i32 = 20;

/// Largest font size the corner-resize gesture produces.
pub const FONT_MAX: i32 = 300;

/// Font size used when a stored record carries neither `max_font_size` nor `fontSize`.
pub const FALLBACK_FONT_SIZE: i32 = 120;

/// Font step applied by the toolbar grow/shrink buttons.
pub const FONT_STEP: i32 = 10;

// ── New slot defaults ───────────────────────────────────────────

pub const NEW_SLOT_X: i32 = 1240;
pub const NEW_SLOT_Y: i32 = 1754;
pub const NEW_SLOT_MAX_WIDTH: i32 = 1000;
pub const NEW_SLOT_MAX_HEIGHT: i32 = 200;
pub const NEW_SLOT_FONT_SIZE: i32 = 160;
pub const NEW_SLOT_CONTENT: &str = "New Text";

/// Text shown in place of empty slot content.
pub const PLACEHOLDER_CONTENT: &str = "Nome Sobrenome";

// ── Keyboard / toolbar steps ────────────────────────────────────

/// Arrow-key nudge in real units.
pub const NUDGE_FINE: i32 = 1;

/// Shift + arrow-key nudge in real units.
pub const NUDGE_COARSE: i32 = 10;

/// Toolbar rotate step in degrees.
pub const ROTATE_STEP: i32 = 90;

/// Shift + toolbar rotate step in degrees.
pub const ROTATE_STEP_FINE: i32 = 15;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge of the slot box to the rotate handle center, in screen pixels.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 42.0;

// ── History / persistence ───────────────────────────────────────

/// Default number of undo snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

/// Bumped whenever the default template changes; stored layouts from other versions are discarded.
pub const LAYOUT_VERSION: &str = "4.3";

/// Storage key holding the serialized slot list.
pub const STORAGE_KEY: &str = "badge_layout_data_v1";

/// Storage key holding the layout version tag.
pub const STORAGE_KEY_VERSION: &str = "badge_layout_version";
