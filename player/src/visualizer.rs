//! The decorative canvas animation.
//!
//! Nothing here looks at the audio signal, every movement is synthetic. The
//! render loop owns a [`Scene`], calls [`Scene::step`] once per frame and then
//! [`Scene::paint`] onto whatever implements [`Surface`].

mod frames;
mod palette;
mod scene;

pub use frames::FrameSlot;
pub use palette::Color;
pub use scene::Scene;

pub type Point = (f64, f64);

/// The slice of player state the render loop reads every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Observed {
    pub playing: bool,
    pub current_time: f64,
    pub total_duration: f64,
    /// 1-based position of the current track and the catalog length.
    pub track: Option<(usize, usize)>,
}

pub trait Surface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    fn polyline(&mut self, points: &[Point], color: Color, line_width: f64);
    fn polygon(&mut self, points: &[Point], color: Color);
    fn circle(&mut self, center: Point, radius: f64, color: Color);
    fn rotated_square(&mut self, center: Point, half_side: f64, angle: f64, color: Color);
    fn text(&mut self, text: &str, at: Point, color: Color);
}
