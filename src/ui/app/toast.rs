//! Toast notification system for transient feedback messages.
//!
//! Toasts report reschedule outcomes and load failures. Each toast carries a
//! unique id, auto-dismisses after a fixed delay and can be dismissed earlier
//! with its close button; several can be on screen at once.

// Allow unused variants/methods - these are API surface for future use
#![allow(dead_code)]

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

/// How long a toast stays up unless dismissed.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

/// Types of toast notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Success message (green)
    Success,
    /// Informational message (blue)
    Info,
    /// Warning message (orange)
    Warning,
    /// Error message (red)
    Error,
}

impl ToastLevel {
    /// Get the icon for this toast level
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Warning => "⚠",
            ToastLevel::Error => "✗",
        }
    }

    /// Get the background color for this toast level
    pub fn background_color(&self, is_dark_theme: bool) -> Color32 {
        if is_dark_theme {
            match self {
                ToastLevel::Success => Color32::from_rgb(30, 70, 40),
                ToastLevel::Info => Color32::from_rgb(30, 50, 80),
                ToastLevel::Warning => Color32::from_rgb(80, 60, 20),
                ToastLevel::Error => Color32::from_rgb(80, 30, 30),
            }
        } else {
            match self {
                ToastLevel::Success => Color32::from_rgb(220, 255, 220),
                ToastLevel::Info => Color32::from_rgb(220, 235, 255),
                ToastLevel::Warning => Color32::from_rgb(255, 245, 200),
                ToastLevel::Error => Color32::from_rgb(255, 220, 220),
            }
        }
    }

    /// Get the text/icon color for this toast level
    pub fn text_color(&self, is_dark_theme: bool) -> Color32 {
        if is_dark_theme {
            match self {
                ToastLevel::Success => Color32::from_rgb(100, 220, 120),
                ToastLevel::Info => Color32::from_rgb(100, 180, 255),
                ToastLevel::Warning => Color32::from_rgb(255, 200, 80),
                ToastLevel::Error => Color32::from_rgb(255, 120, 120),
            }
        } else {
            match self {
                ToastLevel::Success => Color32::from_rgb(30, 120, 50),
                ToastLevel::Info => Color32::from_rgb(30, 80, 150),
                ToastLevel::Warning => Color32::from_rgb(150, 100, 0),
                ToastLevel::Error => Color32::from_rgb(180, 40, 40),
            }
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    /// Unique key for dismissal and rendering
    pub id: u64,
    /// The message to display
    pub message: String,
    /// The severity level
    pub level: ToastLevel,
    /// When this toast was created
    pub created_at: Instant,
    /// How long to show this toast
    pub duration: Duration,
}

impl Toast {
    fn new(id: u64, message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            id,
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: TOAST_DURATION,
        }
    }

    /// Check if this toast has expired
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Get the opacity based on remaining time (for fade out)
    pub fn opacity(&self) -> f32 {
        let elapsed = self.created_at.elapsed();
        let fade_start = self.duration.saturating_sub(Duration::from_millis(500));

        if elapsed >= self.duration {
            0.0
        } else if elapsed >= fade_start {
            let fade_progress = (self.duration - elapsed).as_secs_f32() / 0.5;
            fade_progress.clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Manager for toast notifications
#[derive(Debug, Default)]
pub struct ToastManager {
    /// Active toasts
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastManager {
    /// Create a new toast manager
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, message: impl Into<String>, level: ToastLevel) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast::new(id, message, level));
        id
    }

    /// Add a success toast
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastLevel::Success)
    }

    /// Add an info toast
    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastLevel::Info)
    }

    /// Add a warning toast
    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastLevel::Warning)
    }

    /// Add an error toast
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(message, ToastLevel::Error)
    }

    /// Dismiss one toast by id, leaving the others alone.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Remove expired toasts
    pub fn cleanup(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Check if there are any active toasts
    pub fn has_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Render all active toasts
    pub fn render(&mut self, ctx: &Context, is_dark_theme: bool) {
        self.cleanup();

        if self.toasts.is_empty() {
            return;
        }

        // Request repaint for animation
        ctx.request_repaint();

        // Render toasts from bottom-right, stacking upward
        let screen_rect = ctx.screen_rect();
        let toast_width = 320.0;
        let toast_height = 40.0;
        let margin = 10.0;
        let spacing = 5.0;

        let mut dismissed: Vec<u64> = Vec::new();

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = (i as f32) * (toast_height + spacing);
            let pos = Pos2::new(
                screen_rect.right() - toast_width - margin,
                screen_rect.bottom() - toast_height - margin - y_offset - 30.0, // Above status bar
            );

            egui::Area::new(egui::Id::new(("toast", toast.id)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    let bg_color = toast.level.background_color(is_dark_theme);
                    let text_color = toast.level.text_color(is_dark_theme);

                    // Apply opacity
                    let bg_color = Color32::from_rgba_unmultiplied(
                        bg_color.r(),
                        bg_color.g(),
                        bg_color.b(),
                        (230.0 * opacity) as u8,
                    );
                    let text_color = Color32::from_rgba_unmultiplied(
                        text_color.r(),
                        text_color.g(),
                        text_color.b(),
                        (255.0 * opacity) as u8,
                    );

                    egui::Frame::none()
                        .fill(bg_color)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, text_color.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_min_width(toast_width - 24.0);
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(toast.level.icon()).color(text_color).strong(),
                                );
                                ui.label(
                                    RichText::new(&toast.message)
                                        .color(text_color)
                                        .size(12.0),
                                );
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        let close = ui.add(
                                            egui::Button::new(
                                                RichText::new("✕").color(text_color).size(11.0),
                                            )
                                            .frame(false),
                                        );
                                        if close.clicked() {
                                            dismissed.push(toast.id);
                                        }
                                    },
                                );
                            });
                        });
                });
        }

        for id in dismissed {
            self.dismiss(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut manager = ToastManager::new();
        let a = manager.info("first");
        let b = manager.error("second");
        let c = manager.info("third");
        assert!(a < b && b < c);
    }

    #[test]
    fn test_dismiss_removes_only_the_addressed_toast() {
        let mut manager = ToastManager::new();
        let a = manager.info("keep");
        let b = manager.error("drop");

        manager.dismiss(b);
        assert_eq!(manager.toasts().len(), 1);
        assert_eq!(manager.toasts()[0].id, a);
    }

    #[test]
    fn test_multiple_toasts_coexist() {
        let mut manager = ToastManager::new();
        manager.info("one");
        manager.warning("two");
        manager.error("three");
        assert_eq!(manager.toasts().len(), 3);
        assert!(manager.has_toasts());
    }

    #[test]
    fn test_fresh_toast_is_not_expired() {
        let mut manager = ToastManager::new();
        manager.info("fresh");
        manager.cleanup();
        assert!(manager.has_toasts());
        assert_eq!(manager.toasts()[0].duration, TOAST_DURATION);
    }

    #[test]
    fn test_opacity_full_before_fade() {
        let mut manager = ToastManager::new();
        manager.info("visible");
        assert_eq!(manager.toasts()[0].opacity(), 1.0);
    }
}
