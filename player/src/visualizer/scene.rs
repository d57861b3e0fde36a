use std::f64::consts::PI;

use itertools::Itertools;
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{palette, Color, Observed, Point, Surface};
use crate::{config, time};

const TICK: f64 = 0.01;
const GRID_SPACING: usize = 20;

#[derive(Debug, Clone, PartialEq)]
struct Marker {
    x: f64,
    y: f64,
    radius: f64,
    speed: f64,
    color: Color,
}

#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    bars: Vec<f64>,
    wave: Vec<f64>,
    markers: Vec<Marker>,
    time: f64,
    rng: SmallRng,
}

impl Scene {
    pub fn new(canvas: config::Canvas, shape: config::Visualizer, seed: u64) -> Self {
        let width = f64::from(canvas.width);
        let height = f64::from(canvas.height);
        let mut rng = SmallRng::seed_from_u64(seed);

        let markers = (0..shape.markers)
            .map(|i| Marker {
                x: rng.gen_range(0.0..width),
                y: rng.gen_range(0.0..height),
                radius: rng.gen_range(2.0..7.0),
                speed: rng.gen_range(0.5..2.5),
                color: palette::MARKERS[i % palette::MARKERS.len()],
            })
            .collect();

        Self {
            width,
            height,
            bars: vec![0.0; shape.bars],
            wave: vec![0.0; shape.wave_points],
            markers,
            time: 0.0,
            rng,
        }
    }

    pub fn bars(&self) -> &[f64] {
        &self.bars
    }

    pub fn markers(&self) -> impl Iterator<Item = Point> + '_ {
        self.markers.iter().map(|m| (m.x, m.y))
    }

    /// Advances the animation by one frame.
    pub fn step(&mut self, observed: &Observed) {
        self.time += TICK;
        let t = self.time;

        for bar in &mut self.bars {
            if observed.playing {
                let target = self.rng.gen_range(10.0..60.0);
                *bar = *bar * 0.9 + target * 0.1;
            } else {
                *bar *= 0.95;
            }
        }

        let intensity = if observed.playing { 1.0 } else { 0.2 };
        for (i, w) in self.wave.iter_mut().enumerate() {
            let i = i as f64;
            *w = ((t * 3.0 + i * 0.2).sin() * 15.0
                + (t * 5.0 + i * 0.3).sin() * 5.0
                + (t * 7.0 + i * 0.5).sin() * 3.0)
                * intensity;
        }

        if observed.playing {
            for m in &mut self.markers {
                m.x = wrap(m.x + (t * m.speed).sin() * 2.0, self.width);
                m.y = wrap(m.y + (t * m.speed).cos() * 2.0, self.height);
            }
        }
    }

    pub fn paint<S: Surface + ?Sized>(&self, surface: &mut S, observed: &Observed) {
        let (w, h, t) = (self.width, self.height, self.time);

        surface.fill_rect(0.0, 0.0, w, h, palette::BACKGROUND);
        for y in (0..self.height as usize).step_by(GRID_SPACING) {
            surface.polyline(&[(0.0, y as f64), (w, y as f64)], palette::GRID, 0.5);
        }
        for x in (0..self.width as usize).step_by(GRID_SPACING) {
            surface.polyline(&[(x as f64, 0.0), (x as f64, h)], palette::GRID, 0.5);
        }

        let bar_width = w / self.bars.len() as f64 - 1.0;
        for (i, bar) in self.bars.iter().enumerate() {
            surface.fill_rect(
                i as f64 * (bar_width + 1.0),
                h - bar,
                bar_width,
                *bar,
                palette::bar(i, self.bars.len()),
            );
        }

        let spacing = w / self.wave.len() as f64;
        let wave: Vec<Point> = self
            .wave
            .iter()
            .enumerate()
            .map(|(i, y)| (spacing * i as f64, h / 2.0 + y))
            .collect();
        surface.polyline(&wave, palette::GREEN, 2.0);

        let pulse = if observed.playing {
            1.0 + (t * 5.0).sin() * 0.3
        } else {
            1.0
        };
        for m in &self.markers {
            surface.circle((m.x, m.y), m.radius * pulse, m.color);
        }
        for (prev, m) in self.markers.iter().tuple_windows() {
            surface.polyline(&[(prev.x, prev.y), (m.x, m.y)], m.color, 1.0);
        }

        if observed.playing {
            let size = 20.0 + (t * 8.0).sin() * 10.0;
            let (cx, cy) = (w - 50.0, 50.0);
            surface.polygon(
                &[
                    (cx, cy - size),
                    (cx - size, cy + size),
                    (cx + size, cy + size),
                ],
                palette::ORANGE,
            );
            surface.rotated_square((50.0, 50.0), 15.0, (t * 2.0) % (2.0 * PI), palette::BLUE);
        }

        let time_text = format!(
            "{} / {}",
            time::format_time(observed.current_time),
            time::format_time(observed.total_duration)
        );
        surface.text(&time_text, (10.0, 15.0), palette::WHITE);

        if let Some((ordinal, count)) = observed.track {
            surface.text(&format!("TRACK {ordinal}/{count}"), (w - 70.0, 15.0), palette::WHITE);
        }

        let (status, color) = if observed.playing {
            ("PLAYING", palette::GREEN)
        } else {
            ("PAUSED", palette::ORANGE)
        };
        surface.text(status, (w / 2.0 - 25.0, 15.0), color);
    }
}

/// Wraps `v` into `[0, max)`.
fn wrap(v: f64, max: f64) -> f64 {
    let r = v.rem_euclid(max);
    // rem_euclid can round up to exactly max for tiny negative values
    if r >= max {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect,
        Line(usize),
        Polygon,
        Circle(f64),
        Square,
        Text(String, Color),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: Color) {
            self.0.push(Op::Rect);
        }
        fn polyline(&mut self, points: &[Point], _: Color, _: f64) {
            self.0.push(Op::Line(points.len()));
        }
        fn polygon(&mut self, _: &[Point], _: Color) {
            self.0.push(Op::Polygon);
        }
        fn circle(&mut self, _: Point, radius: f64, _: Color) {
            self.0.push(Op::Circle(radius));
        }
        fn rotated_square(&mut self, _: Point, _: f64, _: f64, _: Color) {
            self.0.push(Op::Square);
        }
        fn text(&mut self, text: &str, _: Point, color: Color) {
            self.0.push(Op::Text(text.to_string(), color));
        }
    }

    fn scene(seed: u64) -> Scene {
        Scene::new(
            config::Canvas::default(),
            config::Visualizer::default(),
            seed,
        )
    }

    fn playing(playing: bool) -> Observed {
        Observed {
            playing,
            current_time: 65.0,
            total_duration: 225.0,
            track: Some((3, 8)),
        }
    }

    #[test]
    fn bars_rise_while_playing_and_decay_while_paused() {
        let mut s = scene(1);
        for _ in 0..100 {
            s.step(&playing(true));
        }
        assert!(s.bars().iter().all(|b| *b > 10.0 && *b < 60.0));

        let before: Vec<f64> = s.bars().to_vec();
        s.step(&playing(false));
        for (b, a) in before.iter().zip(s.bars()) {
            assert!((a - b * 0.95).abs() < 1e-9);
        }

        for _ in 0..500 {
            s.step(&playing(false));
        }
        assert!(s.bars().iter().all(|b| *b < 0.01 && *b > 0.0));
    }

    #[test]
    fn markers_freeze_while_paused() {
        let mut s = scene(2);
        let before: Vec<Point> = s.markers().collect();
        for _ in 0..50 {
            s.step(&playing(false));
        }
        assert_eq!(before, s.markers().collect::<Vec<_>>());

        s.step(&playing(true));
        assert_ne!(before, s.markers().collect::<Vec<_>>());
    }

    #[test]
    fn markers_stay_on_the_canvas() {
        let mut s = scene(3);
        for _ in 0..5000 {
            s.step(&playing(true));
            assert!(s
                .markers()
                .all(|(x, y)| (0.0..400.0).contains(&x) && (0.0..120.0).contains(&y)));
        }
    }

    #[test]
    fn wave_is_damped_not_zeroed_while_paused() {
        let mut on = scene(4);
        let mut off = scene(4);
        on.step(&playing(true));
        off.step(&playing(false));
        for (a, b) in on.wave.iter().zip(&off.wave) {
            assert!((a * 0.2 - b).abs() < 1e-9);
        }
        assert!(off.wave.iter().any(|w| *w != 0.0));
    }

    #[test]
    fn wrapping() {
        assert_eq!(0.0, wrap(400.0, 400.0));
        assert_eq!(399.0, wrap(-1.0, 400.0));
        assert_eq!(0.0, wrap(-1e-17, 400.0));
        assert_eq!(12.5, wrap(12.5, 400.0));
    }

    #[test]
    fn same_seed_same_animation() {
        let mut a = scene(9);
        let mut b = scene(9);
        for _ in 0..10 {
            a.step(&playing(true));
            b.step(&playing(true));
        }
        assert_eq!(a.bars(), b.bars());
    }

    #[test]
    fn reactive_shapes_only_while_playing() {
        let mut s = scene(5);
        s.step(&playing(true));

        let mut rec = Recorder::default();
        s.paint(&mut rec, &playing(true));
        assert_eq!(1, rec.0.iter().filter(|op| **op == Op::Polygon).count());
        assert_eq!(1, rec.0.iter().filter(|op| **op == Op::Square).count());

        let mut rec = Recorder::default();
        s.paint(&mut rec, &playing(false));
        assert!(!rec.0.contains(&Op::Polygon));
        assert!(!rec.0.contains(&Op::Square));
    }

    #[test]
    fn everything_is_drawn() {
        let mut s = scene(6);
        s.step(&playing(false));
        let mut rec = Recorder::default();
        s.paint(&mut rec, &playing(false));

        // background and one per bar
        assert_eq!(33, rec.0.iter().filter(|op| **op == Op::Rect).count());
        // 6 horizontal and 20 vertical grid lines, the wave, 4 marker links
        assert_eq!(26, rec.0.iter().filter(|op| **op == Op::Line(2)).count() - 4);
        assert!(rec.0.contains(&Op::Line(100)));
        assert_eq!(5, rec.0.iter().filter(|op| matches!(op, Op::Circle(_))).count());
    }

    #[test]
    fn text_overlay() {
        let s = scene(7);
        let mut rec = Recorder::default();
        s.paint(&mut rec, &playing(false));
        let texts: Vec<Op> = rec
            .0
            .into_iter()
            .filter(|op| matches!(op, Op::Text(..)))
            .collect();
        assert_eq!(
            vec![
                Op::Text("1:05 / 3:45".to_string(), palette::WHITE),
                Op::Text("TRACK 3/8".to_string(), palette::WHITE),
                Op::Text("PAUSED".to_string(), palette::ORANGE),
            ],
            texts
        );

        let mut rec = Recorder::default();
        s.paint(
            &mut rec,
            &Observed {
                playing: true,
                ..Observed::default()
            },
        );
        assert!(rec
            .0
            .contains(&Op::Text("PLAYING".to_string(), palette::GREEN)));
        assert!(!rec.0.iter().any(|op| matches!(op, Op::Text(t, _) if t.starts_with("TRACK"))));
    }
}
