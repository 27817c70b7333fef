use gtk4::prelude::*;
use libadwaita::prelude::*;

/// Illustrative accuracy-over-epochs series; the dashboard is not wired
/// to live data.
const ACCURACY: [f64; 8] = [82.0, 85.0, 88.0, 90.0, 92.0, 94.0, 95.0, 97.0];

/// Handles for the dashboard page.
pub struct DashboardWidgets {
    pub root: gtk4::Box,
    pub service_label: gtk4::Label,
    pub upload_button: gtk4::Button,
}

/// Build the dashboard page.
pub fn build_dashboard() -> DashboardWidgets {
    let root = gtk4::Box::new(gtk4::Orientation::Vertical, 12);
    root.set_margin_start(24);
    root.set_margin_end(24);
    root.set_margin_top(16);
    root.set_margin_bottom(16);

    let title = gtk4::Label::new(Some("Prediction Dashboard"));
    title.add_css_class("title-2");
    root.append(&title);

    let chart = gtk4::DrawingArea::new();
    chart.set_content_height(280);
    chart.set_hexpand(true);
    chart.set_draw_func(|_area, cr, width, height| {
        draw_accuracy_chart(cr, width, height);
    });

    let frame = gtk4::Frame::new(None);
    frame.set_child(Some(&chart));
    root.append(&frame);

    let caption = gtk4::Label::new(Some(
        "The chart above shows model accuracy improvement across training epochs.",
    ));
    caption.add_css_class("dim-label");
    caption.set_wrap(true);
    root.append(&caption);

    let status_group = libadwaita::PreferencesGroup::new();
    let status_row = libadwaita::ActionRow::builder().title("Service Status").build();
    let service_label = gtk4::Label::new(Some("Service: checking\u{2026}"));
    service_label.add_css_class("dim-label");
    status_row.add_suffix(&service_label);
    status_group.add(&status_row);
    root.append(&status_group);

    let upload_button = gtk4::Button::builder()
        .label("Go to Upload Screen")
        .halign(gtk4::Align::Center)
        .build();
    upload_button.add_css_class("suggested-action");
    upload_button.add_css_class("pill");
    root.append(&upload_button);

    DashboardWidgets {
        root,
        service_label,
        upload_button,
    }
}

/// Draw the fixed accuracy line with axis ticks every 20%.
fn draw_accuracy_chart(cr: &gtk4::cairo::Context, width: i32, height: i32) {
    let w = width as f64;
    let h = height as f64;
    let margin = 36.0;
    let plot_w = w - 2.0 * margin;
    let plot_h = h - 2.0 * margin;
    if plot_w <= 0.0 || plot_h <= 0.0 {
        return;
    }

    let x_of = |i: usize| margin + plot_w * i as f64 / (ACCURACY.len() - 1) as f64;
    let y_of = |acc: f64| margin + plot_h * (1.0 - acc / 100.0);

    // Gridlines and y labels
    cr.set_line_width(1.0);
    for step in 0..=5 {
        let acc = step as f64 * 20.0;
        let y = y_of(acc);
        cr.set_source_rgba(0.5, 0.5, 0.5, 0.3);
        cr.move_to(margin, y);
        cr.line_to(w - margin, y);
        let _ = cr.stroke();

        cr.set_source_rgba(0.4, 0.4, 0.4, 0.9);
        cr.move_to(4.0, y + 4.0);
        let _ = cr.show_text(&format!("{acc:.0}%"));
    }

    // Epoch labels
    for i in 0..ACCURACY.len() {
        cr.set_source_rgba(0.4, 0.4, 0.4, 0.9);
        cr.move_to(x_of(i) - 3.0, h - margin + 16.0);
        let _ = cr.show_text(&format!("{}", i + 1));
    }

    // Accuracy line
    cr.set_source_rgba(0.23, 0.51, 0.96, 0.9);
    cr.set_line_width(3.0);
    cr.move_to(x_of(0), y_of(ACCURACY[0]));
    for (i, &acc) in ACCURACY.iter().enumerate().skip(1) {
        cr.line_to(x_of(i), y_of(acc));
    }
    let _ = cr.stroke();

    // Points
    for (i, &acc) in ACCURACY.iter().enumerate() {
        cr.set_source_rgba(0.23, 0.51, 0.96, 1.0);
        cr.arc(x_of(i), y_of(acc), 5.0, 0.0, std::f64::consts::TAU);
        let _ = cr.fill();
    }
}
