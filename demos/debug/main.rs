//! Profilis debug dump: builds a few profiles and prints what they draw.
//!
//! ```text
//! cargo run --example debug                       # every pattern
//! cargo run --example debug -- morph              # one pattern
//! RUST_LOG=profilis=debug cargo run --example debug
//! ```

use profilis::cache::PathProfileCache;
use profilis::geometry::{BBox, CurveProfile, KnotInfo};
use profilis::math::{Point2, Vector2};
use profilis::operations::morph::{PointsMorph, ProfileMorph};
use profilis::operations::profile::{
    BezierSplineProfile, CircleProfile, CornerRadii, PolylineProfile, RectProfile,
};
use profilis::sink::PathRecorder;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const PATTERNS: [&str; 4] = ["shapes", "path", "morph", "points"];

fn main() {
    // Default: WARN for everything. Override with RUST_LOG.
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let selected: Vec<String> = std::env::args().skip(1).collect();
    for pattern in PATTERNS {
        if selected.is_empty() || selected.iter().any(|name| name == pattern) {
            println!("== {pattern}");
            run_pattern(pattern);
        }
    }
}

fn run_pattern(pattern: &str) {
    match pattern {
        "shapes" => shapes(),
        "path" => path(),
        "morph" => morph(),
        "points" => points(),
        _ => eprintln!("unknown pattern: {pattern}"),
    }
}

fn report(name: &str, profile: &CurveProfile, closed: bool) {
    let mut recorder = PathRecorder::new();
    profile.draw(&mut recorder, 0.0, profile.arc_length, closed);
    let bbox = profile.bbox();
    println!(
        "{name:<10} segments={:<3} length={:>9.3} min_sin={:.3} bbox=({:.1}, {:.1})..({:.1}, {:.1}) ops={} subpaths={}",
        profile.segments.len(),
        profile.arc_length,
        profile.min_sin,
        bbox.min.x,
        bbox.min.y,
        bbox.max.x,
        bbox.max.y,
        recorder.ops().len(),
        recorder.subpath_count(),
    );
}

fn shapes() {
    let circle = CircleProfile::ellipse(Vector2::new(50.0, 50.0)).execute();
    report("circle", &circle, true);

    let ellipse = CircleProfile::ellipse(Vector2::new(100.0, 50.0)).execute();
    report("ellipse", &ellipse, true);

    let rect = BBox::new(Point2::new(0.0, 0.0), Point2::new(100.0, 50.0));
    let rounded = RectProfile::new(rect, CornerRadii::uniform(10.0)).execute();
    report("rect", &rounded, true);

    let smooth = RectProfile::new(rect, CornerRadii::uniform(10.0))
        .with_smooth_corners(RectProfile::DEFAULT_CORNER_SHARPNESS)
        .execute();
    report("squircle", &smooth, true);

    let star = PolylineProfile::new(star_points(5, 50.0, 20.0), 4.0, true).execute();
    report("star", &star, true);

    let knots = [(0.0, 0.0), (100.0, 50.0), (200.0, 0.0), (300.0, 50.0)]
        .iter()
        .map(|&(x, y)| KnotInfo::auto(Point2::new(x, y)))
        .collect();
    let spline = BezierSplineProfile::new(knots, false, 0.4).execute();
    report("spline", &spline, false);
}

fn path() {
    let mut cache = PathProfileCache::new();
    for data in [
        "M0 0 L100 0 L100 100 Z",
        "M0 0 Q50 -50 100 0 T200 0",
        "M0 0 A10 10 0 0 1 20 0",
        "M0 0 L10 0 M20 0 L30 0",
        "M0 0 L100 0 L100 100 Z",
    ] {
        let profile = cache.get_or_build(data);
        report("path", &profile, data.ends_with('Z'));
    }
    println!("cached {} profiles", cache.len());
}

fn morph() {
    let rect = BBox::new(Point2::new(-50.0, -50.0), Point2::new(50.0, 50.0));
    let from = CircleProfile::ellipse(Vector2::new(50.0, 50.0)).execute();
    let to = RectProfile::new(rect, CornerRadii::default()).execute();
    let lerp = ProfileMorph::new(&from, &to).execute();
    println!("subcurves={}", lerp.subcurve_count());
    for step in 0..=4 {
        let progress = f64::from(step) / 4.0;
        report(&format!("t={progress:.2}"), &lerp.at(progress), true);
    }
}

fn points() {
    let from = star_points(4, 40.0, 40.0);
    let to = star_points(6, 60.0, 30.0);
    let lerp = PointsMorph::new(from, to, true).execute();
    for step in 0..=2 {
        let progress = f64::from(step) / 2.0;
        report(&format!("t={progress:.2}"), &lerp.profile_at(progress, 2.0), true);
    }
}

fn star_points(spikes: u32, outer: f64, inner: f64) -> Vec<Point2> {
    let count = spikes * 2;
    (0..count)
        .map(|i| {
            let angle = std::f64::consts::TAU * f64::from(i) / f64::from(count);
            let radius = if i % 2 == 0 { outer } else { inner };
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}
