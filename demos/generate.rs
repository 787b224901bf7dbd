use meshy::{ArtworkParams, BlendMode, Canvas, compose_svg, update_combined_filter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let params = ArtworkParams {
        stop_count: 5,
        base_hue: 210.0,
        canvas: Canvas::new(1200, 800),
        blend: BlendMode::Overlay,
        blur_std_deviation: 0.0,
    };

    let svg = compose_svg(&params)?;
    let tuned = update_combined_filter(&svg, 4.0, BlendMode::Screen);
    println!("{tuned}");

    Ok(())
}
