//! Platform-independent core of the portfolio front-end.
//!
//! Everything here is plain state and math: the web crate feeds in time and
//! input samples, and projects the snapshots this crate produces onto the
//! page. No module reads a clock or touches a platform API, so the whole
//! crate runs and tests on the host.

pub mod color;
pub mod constants;
pub mod contact;
pub mod field;
pub mod hero;
pub mod intro;
pub mod nav;
pub mod playground;
pub mod pointer;
pub mod pulse;
pub mod surface;
pub mod trail;

pub use color::{ColorParseError, Rgba};
pub use contact::{ContactDraft, ContactError, RelayReply, SubmitStatus};
pub use field::{FieldConfig, ParticleField};
pub use hero::{Camera, HeroInstance, HeroPalette, HeroScene};
pub use intro::{IntroConfig, IntroEvent, IntroPhase, IntroSequence};
pub use playground::{CardState, PlaygroundConfig, SkillsWorld};
pub use pointer::PointerTracker;
pub use pulse::{Pulse, PulseQueue};
pub use surface::{BoundaryPolicy, SurfaceBounds};
pub use trail::{CursorTrail, TrailNodeView};
