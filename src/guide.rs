//! # Lyricue guide
//!
//! A walkthrough of the timing model, the project file and the built-in presets. For
//! copy/paste commands, start with the repository `README.md`.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Timeline`](crate::Timeline): time-sorted [`LyricEntry`](crate::LyricEntry) values parsed
//!   from an `.lrc` document
//! - [`TimelineEvaluator`](crate::TimelineEvaluator): maps a query time to the active entry and
//!   its fade level
//! - [`PlanPreset`](crate::PlanPreset): plain-line style, fade curve and keyword table
//! - [`FrameScene`](crate::FrameScene): z-ordered glyph layers for one frame
//! - [`LyricSession`](crate::LyricSession): owns everything loaded from disk for one render
//!
//! ---
//!
//! ## Parsing
//!
//! A line is kept when it contains a `[MM:SS.ff]` tag (two-digit minutes and seconds, a two- or
//! three-digit fraction) and non-blank text once every tag is removed. The fraction is
//! right-padded to milliseconds: `[00:01.50]` and `[00:01.500]` are both 1.5 s. Everything
//! else is skipped without error.
//!
//! With [`RepeatTags::FirstTag`](crate::RepeatTags::FirstTag) (the default) a line such as
//! `[00:10.00][00:40.00]chorus` yields one entry at 10 s. Set
//! [`RepeatTags::Expand`](crate::RepeatTags::Expand) to get one entry per tag.
//!
//! Entries are stably sorted by time. Equal times keep document order.
//!
//! ---
//!
//! ## Evaluation
//!
//! Entry `i` owns the half-open interval `[time_i, time_{i+1})`. The last entry never
//! expires: queries past it keep selecting it, with a duration of
//! [`LAST_ENTRY_HOLD_SECS`](crate::LAST_ENTRY_HOLD_SECS) used for the envelope. Among equal
//! start times only the last one is ever active, since the earlier ones own empty intervals.
//!
//! The fade level follows a four-point curve over `[0, d]`:
//!
//! ```text
//! level
//!   1 |      ____________
//!     |     /            \
//!   0 |____/              \____
//!     0  fade_in      fade_out  d
//! ```
//!
//! with `fade_in = min(1 s, 0.4 d)` and `fade_out = max(d - 1 s, 0.6 d)`. Lines too short for
//! those breakpoints to be distinct fall back to a curve that is still strictly increasing, so
//! evaluation never fails.
//!
//! For sequential frame walks, [`TimelineCursor`](crate::TimelineCursor) skips the binary
//! search while the active entry is unchanged.
//!
//! ---
//!
//! ## Project file
//!
//! ```json
//! {
//!   "lyrics": "song.lrc",
//!   "fps": { "num": 30, "den": 1 },
//!   "canvas": { "width": 1920, "height": 1080 },
//!   "plan": "i",
//!   "font": "fonts/mincho.otf",
//!   "envelope": { "fade_in_secs": 1.0, "fade_out_secs": 1.0 },
//!   "last_entry_hold_secs": 5.0,
//!   "parse": { "repeat_tags": "first_tag" },
//!   "background": "#101010"
//! }
//! ```
//!
//! Only `lyrics` is required. A missing lyric file is logged and rendered as an empty
//! timeline; a configured font that cannot be loaded is an error. Fonts placed in a `fonts/`
//! directory next to the project are picked up automatically.
//!
//! `specials` replaces the plan's keyword table:
//!
//! ```json
//! "specials": {
//!   "window_secs": 5.0,
//!   "items": [
//!     {
//!       "keyword": "空",
//!       "start_time": 83,
//!       "animation": { "type": "BIG_OUTLINE", "reveal_secs": 2.0 },
//!       "placement": { "top": 30, "left": 50, "scale": 2.5, "z_index": 0 },
//!       "opacity": 0.5
//!     }
//!   ]
//! }
//! ```
//!
//! An item matches when the active line contains `keyword` and, if `start_time` is set, the
//! line starts strictly less than `window_secs` away from it. When any item matches, the plain
//! line is hidden. Items listing the active line in `linger_on` stay on screen fully drawn.
//!
//! ---
//!
//! ## Presets
//!
//! | plan | plain line              | specials                                            |
//! |------|-------------------------|-----------------------------------------------------|
//! | `a`  | vertical, right edge    | none                                                |
//! | `b`  | vertical                | blurred giant sky, ink-bleed answer, dimmed backdrop|
//! | `c`  | vertical                | converging sky, rising answer                       |
//! | `d`  | bottom                  | colossal outline sky, hand-drawn words              |
//! | `e`  | bottom, 0.5 s fades     | outline sky, blur-in words                          |
//! | `f`  | vertical, 0.5 s fades   | floating outline, vertical hand-drawn words         |
//! | `g`  | bottom                  | giant outline, floating words                       |
//! | `h`  | bottom                  | placed outline, floating and waving words           |
//! | `i`  | bottom                  | built-in keyword table                              |
//!
//! ---
//!
//! ## Rendering
//!
//! Scenes are serialized to SVG ([`scene_to_svg`](crate::scene_to_svg)) and rasterized with
//! `resvg` against the session's font database. Output pixels are straight-alpha RGBA8, so a
//! frame without background is a transparent overlay ready for compositing.
//!
//! [`LyricSession::render_range_to_dir`](crate::LyricSession::render_range_to_dir) writes a
//! numbered PNG sequence, rasterizing each distinct frame once and optionally in parallel.
