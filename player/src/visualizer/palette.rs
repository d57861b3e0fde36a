pub type Color = &'static str;

pub const BACKGROUND: Color = "#1a1a1a";
pub const GRID: Color = "#333333";
pub const ORANGE: Color = "#ff6b00";
pub const BLUE: Color = "#00c2ff";
pub const GREEN: Color = "#00ff9d";
pub const WHITE: Color = "#ffffff";

pub const MARKERS: [Color; 5] = [ORANGE, BLUE, GREEN, WHITE, ORANGE];

/// Bars are split into four equally wide color bands.
pub fn bar(index: usize, count: usize) -> Color {
    match index * 4 / count.max(1) {
        0 => ORANGE,
        1 => BLUE,
        2 => GREEN,
        _ => WHITE,
    }
}
