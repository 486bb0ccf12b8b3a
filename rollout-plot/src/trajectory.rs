use plotters::{coord::Shift, prelude::*};

use super::Series;

/// Draw labeled line series onto a caller-provided drawing area
///
/// This is the piece a `TaskSolver` calls from its `plot_rollout` override.
pub fn draw_trajectory<DB: DrawingBackend>(
    axes: &DrawingArea<DB, Shift>,
    caption: &str,
    series: &[(&str, &Series)],
) {
    let mut x_min = f64::MAX;
    let mut x_max = f64::MIN;
    let mut y_min = f64::MAX;
    let mut y_max = f64::MIN;
    for (_, s) in series {
        for (x, y) in s.iter() {
            if *x < x_min {
                x_min = *x;
            }
            if *x > x_max {
                x_max = *x;
            }
            if *y < y_min {
                y_min = *y;
            }
            if *y > y_max {
                y_max = *y;
            }
        }
    }
    if x_min > x_max {
        warn!("draw_trajectory called without any points, nothing to draw");
        return;
    }
    if y_min == y_max {
        // a flat series still needs a non-empty vertical range
        y_min -= 1.0;
        y_max += 1.0;
    }

    let mut cc0 = ChartBuilder::on(axes)
        .margin(5)
        .set_all_label_area_size(50)
        .caption(caption, ("sans-serif", 30).into_font().with_color(&BLACK))
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .unwrap();
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_label_formatter(&|v| format!("{:.2}", v))
        .y_label_formatter(&|v| format!("{:.4}", v))
        .draw()
        .unwrap();

    let colors = [&BLACK, &RED, &GREEN, &BLUE];
    for (i, (label, s)) in series.iter().enumerate() {
        let color = colors[i % colors.len()];
        cc0.draw_series(LineSeries::new((*s).clone(), color))
            .unwrap()
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }
    cc0.configure_series_labels().border_style(&BLACK).draw().unwrap();
}

/// Render labeled line series to a png file
pub fn plot(series: &[(&str, &Series)], caption: &str, filename: &str, dims: (u32, u32)) {
    info!("plotting {} series to {}", series.len(), filename);

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE).unwrap();

    draw_trajectory(&root_area, caption, series);
    root_area.present().unwrap();

    info!("successfully plotted to {}", filename);
}
