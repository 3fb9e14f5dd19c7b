//! In-window file dialog.
//!
//! A flat listing of one directory at a time, drawn over the editor
//! area. Entries are sorted directories-first with a `..` entry on top
//! for walking up. Single click or Up/Down selects; double click or
//! Return activates the selection — descending into a directory or
//! yielding a file for the app to open. Escape cancels.

use std::path::{Path, PathBuf};

use kedit_core::{Event, FontCatalog, FontId, Key, MouseButton};

use crate::render::{Align, Rect, Renderer};
use crate::theme;

pub const DIALOG_LINE_HEIGHT: i32 = 30;
pub const DIALOG_PADDING: i32 = 10;
pub const DIALOG_LINE_GAP: i32 = 10;

/// What an event did to the dialog, when it did anything final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    /// A file was picked; the dialog is done.
    Chosen(PathBuf),
    /// The dialog was dismissed without picking anything.
    Cancelled,
}

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    is_dir: bool,
}

pub struct FileDialog {
    bounds: Rect,
    current_dir: PathBuf,
    entries: Vec<Entry>,
    selected: Option<usize>,
    scroll_offset: i32,
}

impl FileDialog {
    pub fn new(start_dir: impl Into<PathBuf>) -> Self {
        let mut dialog = Self {
            bounds: Rect::new(0, 0, 0, 0),
            current_dir: start_dir.into(),
            entries: Vec::new(),
            selected: None,
            scroll_offset: 0,
        };
        let dir = dialog.current_dir.clone();
        dialog.load_directory(&dir);
        dialog
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    /// Clears any stale selection for a fresh showing.
    pub fn reopen(&mut self) {
        self.selected = None;
        self.scroll_offset = 0;
    }

    /// The app hands the dialog the editor area each frame, the same
    /// rectangle the editor would otherwise draw into.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Re-reads a directory into the listing. An unreadable directory is
    /// skipped and the current listing stays.
    fn load_directory(&mut self, path: &Path) {
        let Ok(read) = std::fs::read_dir(path) else {
            tracing::warn!("cannot read directory {}", path.display());
            return;
        };

        let mut entries: Vec<Entry> = read
            .filter_map(|e| e.ok())
            .map(|e| Entry {
                is_dir: e.file_type().map(|t| t.is_dir()).unwrap_or(false),
                name: e.file_name().to_string_lossy().into_owned(),
            })
            .collect();

        entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then(a.name.cmp(&b.name)));
        entries.insert(
            0,
            Entry {
                name: "..".to_string(),
                is_dir: true,
            },
        );

        self.entries = entries;
        self.current_dir = path.to_path_buf();
        self.selected = None;
        self.scroll_offset = 0;
    }

    /// Descends into a directory or yields the picked file.
    fn activate(&mut self, index: usize) -> Option<DialogAction> {
        let entry = self.entries.get(index)?;
        let target = self.current_dir.join(&entry.name);

        if entry.is_dir {
            self.load_directory(&target);
            None
        } else {
            Some(DialogAction::Chosen(target))
        }
    }

    fn content_height(&self) -> i32 {
        DIALOG_PADDING + self.entries.len() as i32 * (DIALOG_LINE_HEIGHT + DIALOG_LINE_GAP)
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = (self.content_height() - self.bounds.h).max(0);
        self.scroll_offset = self.scroll_offset.clamp(0, max_scroll);
    }

    /// Scrolls just enough to bring the selected entry into view.
    fn ensure_selection_visible(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };

        let item_top =
            DIALOG_PADDING + selected as i32 * (DIALOG_LINE_HEIGHT + DIALOG_LINE_GAP);
        let item_bottom = item_top + DIALOG_LINE_HEIGHT;

        if item_top < self.scroll_offset {
            self.scroll_offset = item_top - DIALOG_PADDING;
        } else if item_bottom > self.scroll_offset + self.bounds.h {
            self.scroll_offset = item_bottom - self.bounds.h + DIALOG_PADDING / 2;
        }
    }

    fn entry_at(&self, x: i32, y: i32) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let local_y = y - self.bounds.y - DIALOG_PADDING + self.scroll_offset;
        if local_y < 0 {
            return None;
        }
        let index = (local_y / (DIALOG_LINE_HEIGHT + DIALOG_LINE_GAP)) as usize;
        (index < self.entries.len()).then_some(index)
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<DialogAction> {
        match *event {
            Event::MouseButtonDown {
                x,
                y,
                button: MouseButton::Left,
                clicks,
            } => {
                let index = self.entry_at(x, y)?;
                if clicks >= 2 && self.selected == Some(index) {
                    return self.activate(index);
                }
                self.selected = Some(index);
                None
            }

            Event::KeyDown { key, .. } => {
                let action = match key {
                    Key::Down => {
                        let next = self.selected.map(|i| i + 1).unwrap_or(0);
                        if next < self.entries.len() {
                            self.selected = Some(next);
                        }
                        None
                    }
                    Key::Up => {
                        if let Some(i) = self.selected {
                            if i > 0 {
                                self.selected = Some(i - 1);
                            }
                        }
                        None
                    }
                    Key::Return => self.selected.and_then(|i| self.activate(i)),
                    Key::Escape => Some(DialogAction::Cancelled),
                    _ => None,
                };

                self.ensure_selection_visible();
                self.clamp_scroll();
                action
            }

            Event::MouseWheel { y, .. } => {
                self.scroll_offset -= y * (DIALOG_LINE_HEIGHT + DIALOG_PADDING);
                self.clamp_scroll();
                None
            }

            _ => None,
        }
    }

    pub fn render(&self, r: &mut dyn Renderer, _fonts: &dyn FontCatalog, font: FontId) {
        r.fill_rect(self.bounds, theme::DIALOG_BACKGROUND);

        for (i, entry) in self.entries.iter().enumerate() {
            let item_y = self.bounds.y + DIALOG_PADDING
                + i as i32 * (DIALOG_LINE_HEIGHT + DIALOG_LINE_GAP)
                - self.scroll_offset;

            if item_y + DIALOG_LINE_HEIGHT < self.bounds.y
                || item_y > self.bounds.y + self.bounds.h
            {
                continue;
            }

            if self.selected == Some(i) {
                r.fill_rect(
                    Rect::new(
                        self.bounds.x + DIALOG_PADDING,
                        item_y,
                        self.bounds.w - DIALOG_PADDING * 2,
                        DIALOG_LINE_HEIGHT,
                    ),
                    theme::DIALOG_SELECTION,
                );
            }

            let label = if entry.is_dir && entry.name != ".." {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            r.draw_text(
                font,
                &label,
                self.bounds.x + DIALOG_PADDING + 10,
                item_y + 5,
                Align::Left,
                theme::DIALOG_TEXT,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use kedit_core::{FixedAdvance, Mods};

    fn key(dialog: &mut FileDialog, key: Key) -> Option<DialogAction> {
        dialog.handle_event(&Event::KeyDown {
            key,
            mods: Mods::NONE,
        })
    }

    fn temp_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("sub")).expect("mkdir");
        std::fs::write(dir.path().join("b.txt"), "b").expect("write");
        std::fs::write(dir.path().join("a.txt"), "a").expect("write");
        dir
    }

    #[test]
    fn listing_puts_dotdot_then_dirs_then_sorted_files() {
        let tree = temp_tree();
        let dialog = FileDialog::new(tree.path());

        let names: Vec<&str> = dialog.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "sub", "a.txt", "b.txt"]);
    }

    #[test]
    fn return_on_a_file_yields_its_path() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        dialog.set_bounds(Rect::new(0, 0, 400, 300));

        // .., sub, a.txt
        key(&mut dialog, Key::Down);
        key(&mut dialog, Key::Down);
        let action = key(&mut dialog, Key::Return);

        assert_eq!(
            action,
            Some(DialogAction::Chosen(tree.path().join("a.txt")))
        );
    }

    #[test]
    fn return_on_a_directory_descends() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        dialog.set_bounds(Rect::new(0, 0, 400, 300));

        key(&mut dialog, Key::Down); // "sub"
        let action = key(&mut dialog, Key::Return);

        assert_eq!(action, None);
        assert_eq!(dialog.current_dir(), tree.path().join("sub"));
        assert_eq!(dialog.selected, None);
    }

    #[test]
    fn double_click_activates_a_selected_entry() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        dialog.set_bounds(Rect::new(0, 0, 400, 300));

        // Entry 2 ("a.txt") starts at y = PADDING + 2 * 40.
        let y = DIALOG_PADDING + 2 * (DIALOG_LINE_HEIGHT + DIALOG_LINE_GAP) + 5;
        let single = Event::MouseButtonDown {
            x: 50,
            y,
            button: MouseButton::Left,
            clicks: 1,
        };
        assert_eq!(dialog.handle_event(&single), None);
        assert_eq!(dialog.selected, Some(2));

        let double = Event::MouseButtonDown {
            x: 50,
            y,
            button: MouseButton::Left,
            clicks: 2,
        };
        assert_eq!(
            dialog.handle_event(&double),
            Some(DialogAction::Chosen(tree.path().join("a.txt")))
        );
    }

    #[test]
    fn clicks_outside_the_bounds_are_ignored() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        dialog.set_bounds(Rect::new(0, 30, 400, 300));

        let outside = Event::MouseButtonDown {
            x: 500,
            y: 100,
            button: MouseButton::Left,
            clicks: 1,
        };
        assert_eq!(dialog.handle_event(&outside), None);
        assert_eq!(dialog.selected, None);
    }

    #[test]
    fn escape_cancels() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        assert_eq!(key(&mut dialog, Key::Escape), Some(DialogAction::Cancelled));
    }

    #[test]
    fn keyboard_selection_stays_in_range() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        dialog.set_bounds(Rect::new(0, 0, 400, 300));

        key(&mut dialog, Key::Up);
        assert_eq!(dialog.selected, None);

        for _ in 0..20 {
            key(&mut dialog, Key::Down);
        }
        assert_eq!(dialog.selected, Some(dialog.entries.len() - 1));
    }

    #[test]
    fn selection_below_the_viewport_scrolls_down() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        // Viewport fits barely one row.
        dialog.set_bounds(Rect::new(0, 0, 400, 60));

        for _ in 0..4 {
            key(&mut dialog, Key::Down);
        }
        assert!(dialog.scroll_offset > 0);
        assert!(dialog.scroll_offset <= dialog.content_height() - dialog.bounds.h);
    }

    #[test]
    fn wheel_scrolling_clamps_to_content() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        dialog.set_bounds(Rect::new(0, 0, 400, 60));

        dialog.handle_event(&Event::MouseWheel {
            x: 0,
            y: 5,
            mods: Mods::NONE,
        });
        assert_eq!(dialog.scroll_offset, 0);

        dialog.handle_event(&Event::MouseWheel {
            x: 0,
            y: -100,
            mods: Mods::NONE,
        });
        assert_eq!(
            dialog.scroll_offset,
            dialog.content_height() - dialog.bounds.h
        );
    }

    #[test]
    fn render_marks_directories_with_a_slash() {
        let tree = temp_tree();
        let mut dialog = FileDialog::new(tree.path());
        dialog.set_bounds(Rect::new(0, 0, 400, 300));

        let mut fonts = FixedAdvance::default();
        let font = fonts.font(std::path::Path::new("ui.ttf"), 14);
        let mut r = RecordingRenderer::new();
        dialog.render(&mut r, &fonts, font);

        assert_eq!(r.texts(), vec!["..", "sub/", "a.txt", "b.txt"]);
    }
}
