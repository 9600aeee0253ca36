//! Built-in components

mod debug_stats;
mod draw_hitbox;
mod fixed_rate;

pub use debug_stats::DebugStats;
pub use draw_hitbox::DrawHitbox;
pub use fixed_rate::FixedRate;
