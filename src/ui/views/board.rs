//! The scheduling grid: one row per staff member, 96 quarter-hour columns,
//! visit blocks placed by slot, drop highlighting and the drag wiring into
//! the interaction state machine.

use egui::{
    Align2, Color32, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, Vec2,
};
use std::collections::HashSet;

use super::palette::{
    accompany_accent, capacity_color, service_color, two_staff_accent, with_alpha, BoardPalette,
};
use crate::models::roster::{utilization, CapacityBand};
use crate::models::slot::{
    duration_slots, slot_label, slot_of_instant, SLOTS_PER_DAY, SLOTS_PER_HOUR,
};
use crate::models::visit::{ServiceKind, Visit, VisitMode, VisitStatus};
use crate::ui::app::data::DayBoard;
use crate::ui::drag::{DragState, RescheduleIntent};

/// Grid geometry constants.
pub const STAFF_COL_WIDTH: f32 = 150.0;
pub const SLOT_WIDTH: f32 = 30.0;
pub const ROW_HEIGHT: f32 = 64.0;
pub const HEADER_HEIGHT: f32 = 28.0;

/// What the user did on the board this frame.
#[derive(Default)]
pub struct BoardInteraction {
    /// A completed drop; the app submits it to the rescheduling protocol.
    pub intent: Option<RescheduleIntent>,
    /// A clicked block; the app opens the visit dialog.
    pub open_visit: Option<Visit>,
}

impl BoardInteraction {
    fn merge(&mut self, other: BoardInteraction) {
        if other.intent.is_some() {
            self.intent = other.intent;
        }
        if other.open_visit.is_some() {
            self.open_visit = other.open_visit;
        }
    }
}

/// Render the full day grid inside a two-way scroll area.
pub fn render_board(
    ui: &mut egui::Ui,
    board: &DayBoard,
    drag: &mut DragState,
    in_flight: &HashSet<String>,
    palette: &BoardPalette,
) -> BoardInteraction {
    let mut result = BoardInteraction::default();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            result.merge(render_grid(ui, board, drag, in_flight, palette));
        });

    result
}

fn render_grid(
    ui: &mut egui::Ui,
    board: &DayBoard,
    drag: &mut DragState,
    in_flight: &HashSet<String>,
    palette: &BoardPalette,
) -> BoardInteraction {
    let mut result = BoardInteraction::default();

    let grid_width = SLOTS_PER_DAY as f32 * SLOT_WIDTH;
    let total = Vec2::new(
        STAFF_COL_WIDTH + grid_width,
        HEADER_HEIGHT + board.staff.len() as f32 * ROW_HEIGHT,
    );
    let (rect, _) = ui.allocate_exact_size(total, Sense::hover());
    let painter = ui.painter_at(rect);

    let grid_left = rect.left() + STAFF_COL_WIDTH;
    let grid_top = rect.top() + HEADER_HEIGHT;
    let grid_bottom = rect.bottom();

    // Row backgrounds, alternating like the original board
    for (idx, _) in board.staff.iter().enumerate() {
        let top = grid_top + idx as f32 * ROW_HEIGHT;
        let row_rect = Rect::from_min_size(
            Pos2::new(rect.left(), top),
            Vec2::new(total.x, ROW_HEIGHT),
        );
        let fill = if idx % 2 == 0 {
            palette.row_bg
        } else {
            palette.row_alt_bg
        };
        painter.rect_filled(row_rect, 0.0, fill);
    }

    // Header band and time axis labels at full hours
    painter.rect_filled(
        Rect::from_min_size(rect.min, Vec2::new(total.x, HEADER_HEIGHT)),
        0.0,
        palette.header_bg,
    );
    for slot in 0..SLOTS_PER_DAY {
        let x = grid_left + slot as f32 * SLOT_WIDTH;
        let is_hour = slot % SLOTS_PER_HOUR == 0;

        let line_color = if is_hour {
            palette.hour_line
        } else {
            palette.grid_line
        };
        painter.line_segment(
            [Pos2::new(x, grid_top), Pos2::new(x, grid_bottom)],
            Stroke::new(1.0, line_color),
        );

        if is_hour {
            painter.text(
                Pos2::new(x + 3.0, rect.top() + HEADER_HEIGHT / 2.0),
                Align2::LEFT_CENTER,
                slot_label(slot),
                FontId::proportional(11.0),
                palette.text_muted,
            );
        }
    }

    // Drop target highlight under everything else
    if let Some(target) = drag.target() {
        if let Some(row) = board.staff.iter().position(|s| s.id == target.staff_id) {
            let cell = Rect::from_min_size(
                Pos2::new(
                    grid_left + target.slot as f32 * SLOT_WIDTH,
                    grid_top + row as f32 * ROW_HEIGHT,
                ),
                Vec2::new(SLOT_WIDTH, ROW_HEIGHT),
            );
            painter.rect_filled(cell, 2.0, palette.drop_fill);
            painter.rect_stroke(cell, 2.0, Stroke::new(1.5, palette.drop_stroke));
        }
    }

    render_staff_column(&painter, board, rect, palette);

    // Visit blocks, row by row
    for (row, member) in board.staff.iter().enumerate() {
        let row_top = grid_top + row as f32 * ROW_HEIGHT;

        for visit in board.roster.visits_for(&member.id) {
            let start_slot = slot_of_instant(visit.scheduled_start) as f32;
            let span = duration_slots(visit.scheduled_start, visit.scheduled_end) as f32;

            let block_rect = Rect::from_min_size(
                Pos2::new(grid_left + start_slot * SLOT_WIDTH + 2.0, row_top + 6.0),
                Vec2::new(span * SLOT_WIDTH - 4.0, ROW_HEIGHT - 12.0),
            );

            let pending = in_flight.contains(&visit.id);
            paint_visit_block(&painter, block_rect, visit, pending, palette);

            result.merge(interact_with_block(
                ui, board, drag, visit, block_rect, grid_left, grid_top, pending,
            ));
        }
    }

    // Pointer tracking for the active drag: update the candidate cell while
    // moving, finish or cancel on release, abort on Escape.
    if drag.is_dragging() {
        ui.output_mut(|out| out.cursor_icon = CursorIcon::Grabbing);

        let pointer = ui.input(|i| i.pointer.interact_pos().or_else(|| i.pointer.hover_pos()));
        match pointer.and_then(|pos| cell_at(pos, board, grid_left, grid_top)) {
            Some((row, slot)) => drag.hover(&board.staff[row].id, slot),
            None => drag.clear_target(),
        }

        if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            drag.cancel();
        } else if ui.input(|i| i.pointer.primary_released()) {
            match drag.drop_on(board.date) {
                Some(intent) => result.intent = Some(intent),
                // Released outside the grid: silently discard the gesture
                None => drag.cancel(),
            }
        }
    }

    result
}

/// Map a screen position to a (staff row, slot) cell, or `None` off-grid.
fn cell_at(pos: Pos2, board: &DayBoard, grid_left: f32, grid_top: f32) -> Option<(usize, i64)> {
    let slot = ((pos.x - grid_left) / SLOT_WIDTH).floor() as i64;
    let row = ((pos.y - grid_top) / ROW_HEIGHT).floor() as i64;

    if slot < 0 || slot >= SLOTS_PER_DAY as i64 {
        return None;
    }
    if row < 0 || row >= board.staff.len() as i64 {
        return None;
    }
    Some((row as usize, slot))
}

#[allow(clippy::too_many_arguments)]
fn interact_with_block(
    ui: &mut egui::Ui,
    board: &DayBoard,
    drag: &mut DragState,
    visit: &Visit,
    block_rect: Rect,
    grid_left: f32,
    grid_top: f32,
    pending: bool,
) -> BoardInteraction {
    let mut result = BoardInteraction::default();

    let response = ui.interact(
        block_rect,
        egui::Id::new(("visit-block", visit.id.as_str())),
        Sense::click_and_drag(),
    );

    let response = response.on_hover_text(format!(
        "{}\n{} · {} min\n{} – {}",
        visit.client_label(),
        visit.service.label(),
        visit.duration_minutes(),
        visit.scheduled_start.format("%H:%M"),
        visit.scheduled_end.format("%H:%M"),
    ));

    if response.hovered() && !pending {
        ui.output_mut(|out| out.cursor_icon = CursorIcon::Grab);
    }

    if response.clicked() {
        result.open_visit = Some(visit.clone());
    }

    // A grab on a visit with an outstanding reschedule is refused until the
    // request resolves and the refreshed data lands.
    if response.drag_started() && !pending {
        if let Some(pos) = response.interact_pointer_pos() {
            if let Some((_, pointer_slot)) = cell_at(pos, board, grid_left, grid_top) {
                drag.begin(visit, pointer_slot);
            }
        }
    }

    result
}

fn paint_visit_block(
    painter: &egui::Painter,
    block_rect: Rect,
    visit: &Visit,
    pending: bool,
    palette: &BoardPalette,
) {
    let cancelled = visit.status == VisitStatus::Cancelled;

    let fill = if cancelled {
        with_alpha(Color32::from_rgb(100, 100, 100), 100)
    } else if pending {
        with_alpha(service_color(visit.service), 110)
    } else {
        with_alpha(service_color(visit.service), 216)
    };
    painter.rect_filled(block_rect, 4.0, fill);

    // Mode accents: amber outline for two-staff, grey outline for accompany
    match visit.mode {
        VisitMode::TwoStaff => {
            painter.rect_stroke(block_rect, 4.0, Stroke::new(2.0, two_staff_accent()));
        }
        VisitMode::Accompany => {
            painter.rect_stroke(block_rect, 4.0, Stroke::new(1.5, accompany_accent()));
        }
        VisitMode::Normal => {}
    }

    // Service stripe on the left edge
    let stripe = Rect::from_min_size(block_rect.min, Vec2::new(3.0, block_rect.height()));
    painter.rect_filled(stripe, 2.0, service_color(visit.service));

    let text_color = if cancelled {
        with_alpha(palette.block_text, 140)
    } else {
        palette.block_text
    };

    painter.text(
        block_rect.min + Vec2::new(8.0, 4.0),
        Align2::LEFT_TOP,
        visit.client_label(),
        FontId::proportional(11.0),
        text_color,
    );
    painter.text(
        block_rect.min + Vec2::new(8.0, 19.0),
        Align2::LEFT_TOP,
        format!("{} {}min", visit.service.label(), visit.duration_minutes()),
        FontId::proportional(10.0),
        with_alpha(text_color, 200),
    );

    let marker = match (visit.mode, visit.status) {
        (VisitMode::TwoStaff, _) => Some(("2-staff", two_staff_accent())),
        (_, VisitStatus::Completed) => Some(("✓ done", Color32::from_rgb(0x27, 0xAE, 0x60))),
        _ => None,
    };
    if let Some((label, color)) = marker {
        painter.text(
            block_rect.min + Vec2::new(8.0, 33.0),
            Align2::LEFT_TOP,
            label,
            FontId::proportional(9.0),
            color,
        );
    }
}

/// Staff name column with hours and the capacity indicator bar.
fn render_staff_column(
    painter: &egui::Painter,
    board: &DayBoard,
    rect: Rect,
    palette: &BoardPalette,
) {
    let col_rect = Rect::from_min_size(
        rect.min,
        Vec2::new(STAFF_COL_WIDTH, rect.height()),
    );
    painter.rect_filled(col_rect, 0.0, palette.header_bg);
    painter.text(
        Pos2::new(rect.left() + 8.0, rect.top() + HEADER_HEIGHT / 2.0),
        Align2::LEFT_CENTER,
        "Staff",
        FontId::proportional(11.0),
        palette.text_muted,
    );

    for (idx, member) in board.staff.iter().enumerate() {
        let top = rect.top() + HEADER_HEIGHT + idx as f32 * ROW_HEIGHT;

        painter.line_segment(
            [
                Pos2::new(rect.left(), top + ROW_HEIGHT),
                Pos2::new(rect.right(), top + ROW_HEIGHT),
            ],
            Stroke::new(1.0, palette.hour_line),
        );

        let hours = board.roster.assigned_hours(&member.id);
        let ratio = utilization(hours, member.max_hours_day);
        let band = CapacityBand::of(ratio);

        painter.text(
            Pos2::new(rect.left() + 8.0, top + 10.0),
            Align2::LEFT_TOP,
            &member.name,
            FontId::proportional(12.0),
            palette.text,
        );
        painter.text(
            Pos2::new(rect.left() + 8.0, top + 27.0),
            Align2::LEFT_TOP,
            format!("{:.1}h / {}h", hours, member.max_hours_day),
            FontId::proportional(10.0),
            palette.text_muted,
        );

        // Utilization bar
        let bar_rect = Rect::from_min_size(
            Pos2::new(rect.left() + 8.0, top + 44.0),
            Vec2::new(STAFF_COL_WIDTH - 24.0, 4.0),
        );
        painter.rect_filled(bar_rect, 2.0, palette.hour_line);
        let fill_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width() * ratio, bar_rect.height()),
        );
        painter.rect_filled(fill_rect, 2.0, capacity_color(band));
    }
}

/// Service and mode legend shown under the grid.
pub fn render_legend(ui: &mut egui::Ui, palette: &BoardPalette) {
    ui.horizontal_wrapped(|ui| {
        ui.label(
            egui::RichText::new("Legend:")
                .size(11.0)
                .color(palette.text_muted),
        );
        for kind in ServiceKind::ALL {
            legend_chip(ui, service_color(kind), None, kind.label(), palette);
        }
        legend_chip(
            ui,
            with_alpha(service_color(ServiceKind::PersonalCare), 200),
            Some(two_staff_accent()),
            "Two staff",
            palette,
        );
        legend_chip(
            ui,
            with_alpha(Color32::from_rgb(100, 100, 100), 120),
            Some(accompany_accent()),
            "Accompany",
            palette,
        );
    });
}

fn legend_chip(
    ui: &mut egui::Ui,
    fill: Color32,
    stroke: Option<Color32>,
    label: &str,
    palette: &BoardPalette,
) {
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
    ui.painter().rect_filled(rect, 2.0, fill);
    if let Some(stroke) = stroke {
        ui.painter().rect_stroke(rect, 2.0, Stroke::new(1.5, stroke));
    }
    ui.label(
        egui::RichText::new(label)
            .size(11.0)
            .color(palette.text_muted),
    );
    ui.add_space(8.0);
}
