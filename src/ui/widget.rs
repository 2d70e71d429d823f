//! egui front end: a map surface that paints a [`MapScene`] and a panel that
//! wires the city field and buttons to a [`BubbleTeaFinder`].

use crate::{
    core::{geo::Point, viewport::Viewport},
    search::{
        finder::BubbleTeaFinder,
        outcome::{FinderEvent, LocateOutcome, SearchOutcome},
    },
    traits::MapSurface,
    ui::scene::{icon_rect, InfoWindowView, MapScene, MarkerView},
    Result,
};
use egui::{
    Align2, Color32, FontId, Pos2, Rect, Response, Rounding, Sense, Shape, Stroke, Ui, Vec2,
};
use std::time::Duration;

const BACKGROUND: Color32 = Color32::from_rgb(230, 230, 230);
const MARKER_FILL: Color32 = Color32::from_rgb(42, 129, 203);
const MARKER_SELECTED: Color32 = Color32::from_rgb(203, 43, 62);
const POPUP_FILL: Color32 = Color32::WHITE;
const POPUP_TEXT: Color32 = Color32::from_gray(30);

/// Paints scenes into a rectangle of an egui painter
pub struct EguiMapSurface {
    painter: egui::Painter,
    rect: Rect,
    viewport: Viewport,
}

impl EguiMapSurface {
    /// `viewport` must already have the size of `rect`
    pub fn new(painter: egui::Painter, rect: Rect, viewport: Viewport) -> Self {
        Self {
            painter,
            rect,
            viewport,
        }
    }

    fn to_screen(&self, p: Point) -> Pos2 {
        self.rect.min + Vec2::new(p.x as f32, p.y as f32)
    }

    fn draw_marker(&self, marker: &MarkerView, selected: bool) {
        let icon = icon_rect(&self.viewport, &marker.position);
        let min = self.to_screen(icon.min);
        let max = self.to_screen(icon.max);
        let fill = if selected { MARKER_SELECTED } else { MARKER_FILL };

        // round head over a pointed tail ending at the anchor
        let radius = (max.x - min.x) / 2.0;
        let head = Pos2::new(min.x + radius, min.y + radius);
        let tip = Pos2::new(head.x, max.y);
        self.painter.add(Shape::convex_polygon(
            vec![
                Pos2::new(head.x - radius * 0.8, head.y + radius * 0.4),
                tip,
                Pos2::new(head.x + radius * 0.8, head.y + radius * 0.4),
            ],
            fill,
            Stroke::NONE,
        ));
        self.painter
            .circle(head, radius, fill, Stroke::new(1.0, Color32::WHITE));
        self.painter
            .circle_filled(head, radius * 0.35, Color32::WHITE);
    }

    fn draw_info_window(&self, window: &InfoWindowView) {
        let icon = icon_rect(&self.viewport, &window.position);
        let above = self.to_screen(Point::new((icon.min.x + icon.max.x) / 2.0, icon.min.y));

        let galley = self.painter.layout_no_wrap(
            window.content.clone(),
            FontId::proportional(14.0),
            POPUP_TEXT,
        );
        let margin = Vec2::new(10.0, 6.0);
        let size = galley.size() + 2.0 * margin;
        let body = Rect::from_min_size(
            Pos2::new(above.x - size.x / 2.0, above.y - size.y - 8.0),
            size,
        );

        self.painter.add(Shape::convex_polygon(
            vec![
                Pos2::new(above.x - 6.0, body.max.y),
                Pos2::new(above.x, above.y - 2.0),
                Pos2::new(above.x + 6.0, body.max.y),
            ],
            POPUP_FILL,
            Stroke::NONE,
        ));
        self.painter.rect(
            body,
            Rounding::same(4.0),
            POPUP_FILL,
            Stroke::new(1.0, Color32::from_gray(180)),
        );
        self.painter.galley(body.min + margin, galley, POPUP_TEXT);
    }
}

impl MapSurface for EguiMapSurface {
    fn render(&mut self, scene: &MapScene) -> Result<()> {
        self.painter.rect_filled(self.rect, 0.0, BACKGROUND);

        let selected = scene.info_window.as_ref().map(|w| &w.anchor);
        for marker in &scene.markers {
            self.draw_marker(marker, selected == Some(&marker.id));
        }
        if let Some(window) = &scene.info_window {
            self.draw_info_window(window);
        }
        Ok(())
    }
}

/// Sidebar with the city field and buttons next to the interactive map.
///
/// Call [`show`](Self::show) once per frame; it polls the finder, so provider
/// results land without any other plumbing.
pub struct FinderPanel {
    status: Option<String>,
    search_when_located: bool,
    repaint_interval: Duration,
}

impl Default for FinderPanel {
    fn default() -> Self {
        Self {
            status: None,
            search_when_located: false,
            repaint_interval: Duration::from_millis(50),
        }
    }
}

impl FinderPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message about the most recent search or location request
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn show(&mut self, ctx: &egui::Context, finder: &mut BubbleTeaFinder) {
        for event in finder.poll() {
            self.on_event(event, finder);
        }

        egui::SidePanel::left("finder_sidebar")
            .resizable(false)
            .min_width(220.0)
            .show(ctx, |ui| self.sidebar(ui, finder));

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                map_view(ui, finder);
            });

        if finder.is_searching() || finder.is_locating() {
            ctx.request_repaint_after(self.repaint_interval);
        }
    }

    fn sidebar(&mut self, ui: &mut Ui, finder: &mut BubbleTeaFinder) {
        ui.heading("Bubble Tea Finder");
        ui.separator();

        ui.label("City");
        let mut city = finder.city_name().to_string();
        let field = ui.add(egui::TextEdit::singleline(&mut city).hint_text("e.g. Boston"));
        if field.changed() {
            finder.set_city_name(city);
        }
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.horizontal(|ui| {
            if ui.button("Search").clicked() || submitted {
                finder.submit_search();
            }
            if ui
                .add_enabled(!finder.is_locating(), egui::Button::new("Use My Location"))
                .clicked()
            {
                self.search_when_located = true;
                finder.request_device_location();
            }
        });

        if finder.is_searching() || finder.is_locating() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(if finder.is_locating() {
                    "Locating…"
                } else {
                    "Searching…"
                });
            });
        } else if let Some(status) = &self.status {
            ui.label(status.as_str());
        }

        ui.separator();
        let origin = finder.resolved_location();
        let mut clicked = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for place in finder.places() {
                let label = match origin {
                    Some(origin) => format!(
                        "{} ({:.1} km)",
                        place.name,
                        place.distance_from(&origin) / 1000.0
                    ),
                    None => place.name.clone(),
                };
                let selected = finder.info_window().anchor() == Some(&place.id);
                if ui.selectable_label(selected, label).clicked() {
                    clicked = Some(place.id.clone());
                }
            }
        });
        if let Some(id) = clicked {
            finder.click_marker(&id);
        }
    }

    fn on_event(&mut self, event: FinderEvent, finder: &mut BubbleTeaFinder) {
        match event {
            FinderEvent::Search(SearchOutcome::Discarded { .. }) => {}
            FinderEvent::Search(outcome) => self.status = Some(outcome.to_string()),
            FinderEvent::Locate(LocateOutcome::Located { .. }) => {
                if std::mem::take(&mut self.search_when_located) {
                    finder.submit_search_near_device();
                }
            }
            FinderEvent::Locate(LocateOutcome::Failed { error, .. }) => {
                self.search_when_located = false;
                self.status = Some(format!("Couldn't get your location: {error}"));
            }
            FinderEvent::Locate(LocateOutcome::Discarded { .. }) => {}
        }
    }
}

/// Interactive map: drag to pan, scroll to zoom, click a marker for its popup
pub fn map_view(ui: &mut Ui, finder: &mut BubbleTeaFinder) -> Response {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    finder
        .viewport_mut()
        .set_size(Point::new(rect.width() as f64, rect.height() as f64));

    if response.dragged() {
        let delta = response.drag_delta();
        if delta.length_sq() > 0.5 {
            finder
                .viewport_mut()
                .pan(Point::new(delta.x as f64, delta.y as f64));
        }
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll.abs() > 0.1 {
            let zoom = finder.viewport().zoom + scroll as f64 * 0.002;
            finder.viewport_mut().set_zoom(zoom);
        }
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let local = pos - rect.min;
            let pixel = Point::new(local.x as f64, local.y as f64);
            let scene = finder.scene();
            match scene.marker_at(finder.viewport(), &pixel) {
                Some(marker) => {
                    finder.click_marker(&marker.id);
                }
                None => finder.close_info_window(),
            }
        }
    }

    let mut surface = EguiMapSurface::new(ui.painter_at(rect), rect, finder.viewport().clone());
    if let Err(e) = finder.render(&mut surface) {
        log::warn!("map render failed: {}", e);
    }

    ui.painter().text(
        rect.right_bottom() - Vec2::new(6.0, 4.0),
        Align2::RIGHT_BOTTOM,
        format!(
            "{:.4}, {:.4} | z{:.1}",
            finder.viewport().center.lat,
            finder.viewport().center.lng,
            finder.viewport().zoom
        ),
        FontId::monospace(11.0),
        Color32::from_gray(90),
    );

    response
}
