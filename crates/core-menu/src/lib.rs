//! core-menu: the menu bar definition and its navigation state.
//!
//! Every activatable item carries a `MenuCommand`. Handlers dispatch on the
//! enum, never on label text, so relabelling a menu cannot change behavior.
//! Control-key shortcuts are declared on the items themselves and resolved by
//! `MenuBar::command_for_shortcut`; the status text shown next to an item and
//! the binding used by the key translator come from the same declaration.

use core_state::{ColorTarget, FontFamily, FontSize, FontWeight, StyleState};
use smallvec::SmallVec;
use tracing::trace;

// -------------------------------------------------------------------------------------------------
// Commands
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    New,
    Open,
    Save,
    Exit,
    Cut,
    Copy,
    Paste,
    SetWeight(FontWeight),
    SetSize(FontSize),
    SetFamily(FontFamily),
    ChooseColor(ColorTarget),
    Undo,
    Redo,
}

impl MenuCommand {
    /// Style commands that match the current style (rendered with a check mark).
    pub fn is_active(self, style: &StyleState) -> bool {
        match self {
            MenuCommand::SetWeight(w) => style.weight == w,
            MenuCommand::SetSize(s) => style.size == s,
            MenuCommand::SetFamily(f) => style.family == f,
            _ => false,
        }
    }

    /// Commands that continue in a modal dialog.
    pub fn opens_dialog(self) -> bool {
        matches!(
            self,
            MenuCommand::Open | MenuCommand::Save | MenuCommand::ChooseColor(_)
        )
    }
}

// -------------------------------------------------------------------------------------------------
// Menu structure
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Command(MenuCommand),
    Submenu(Vec<MenuItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    /// Control-key shortcut (lowercase ASCII), shown as `^X`.
    pub shortcut: Option<char>,
    pub kind: ItemKind,
}

impl MenuItem {
    fn command(label: impl Into<String>, command: MenuCommand) -> Self {
        Self {
            label: label.into(),
            shortcut: None,
            kind: ItemKind::Command(command),
        }
    }

    fn with_shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }

    fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self {
            label: label.into(),
            shortcut: None,
            kind: ItemKind::Submenu(items),
        }
    }

    pub fn shortcut_label(&self) -> Option<String> {
        self.shortcut.map(|c| format!("^{}", c.to_ascii_uppercase()))
    }

    pub fn command_kind(&self) -> Option<MenuCommand> {
        match &self.kind {
            ItemKind::Command(c) => Some(*c),
            ItemKind::Submenu(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[MenuItem]> {
        match &self.kind {
            ItemKind::Submenu(items) => Some(items),
            ItemKind::Command(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    /// Alt+mnemonic opens this menu.
    pub mnemonic: char,
    pub items: SmallVec<[MenuItem; 6]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBar {
    menus: SmallVec<[Menu; 6]>,
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::standard()
    }
}

impl MenuBar {
    /// File / Edit / Font / FontType / Color / Undo&Redo.
    pub fn standard() -> Self {
        let mut menus = SmallVec::new();
        menus.push(Menu {
            title: "File",
            mnemonic: 'f',
            items: SmallVec::from_vec(vec![
                MenuItem::command("New", MenuCommand::New).with_shortcut('n'),
                MenuItem::command("Open", MenuCommand::Open).with_shortcut('o'),
                MenuItem::command("Save", MenuCommand::Save).with_shortcut('s'),
                MenuItem::command("Exit", MenuCommand::Exit).with_shortcut('e'),
            ]),
        });
        menus.push(Menu {
            title: "Edit",
            mnemonic: 'e',
            items: SmallVec::from_vec(vec![
                MenuItem::command("Cut", MenuCommand::Cut).with_shortcut('x'),
                MenuItem::command("Copy", MenuCommand::Copy).with_shortcut('c'),
                MenuItem::command("Paste", MenuCommand::Paste).with_shortcut('v'),
            ]),
        });
        let sizes = FontSize::ALL
            .into_iter()
            .map(|s| MenuItem::command(s.to_string(), MenuCommand::SetSize(s)))
            .collect();
        menus.push(Menu {
            title: "Font",
            mnemonic: 'o',
            items: SmallVec::from_vec(vec![
                MenuItem::command("Bold", MenuCommand::SetWeight(FontWeight::Bold)),
                MenuItem::command("Plain", MenuCommand::SetWeight(FontWeight::Plain)),
                MenuItem::command("Italic", MenuCommand::SetWeight(FontWeight::Italic)),
                MenuItem::submenu("Size", sizes),
            ]),
        });
        menus.push(Menu {
            title: "FontType",
            mnemonic: 't',
            items: FontFamily::ALL
                .into_iter()
                .map(|f| MenuItem::command(f.label(), MenuCommand::SetFamily(f)))
                .collect(),
        });
        menus.push(Menu {
            title: "Color",
            mnemonic: 'c',
            items: SmallVec::from_vec(vec![
                MenuItem::command(
                    "Background",
                    MenuCommand::ChooseColor(ColorTarget::Background),
                ),
                MenuItem::command(
                    "Foreground",
                    MenuCommand::ChooseColor(ColorTarget::Foreground),
                ),
            ]),
        });
        menus.push(Menu {
            title: "Undo&Redo",
            mnemonic: 'u',
            items: SmallVec::from_vec(vec![
                MenuItem::command("Undo", MenuCommand::Undo).with_shortcut('z'),
                MenuItem::command("Redo", MenuCommand::Redo).with_shortcut('y'),
            ]),
        });
        Self { menus }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn menu(&self, idx: usize) -> Option<&Menu> {
        self.menus.get(idx)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn index_of_mnemonic(&self, c: char) -> Option<usize> {
        let c = c.to_ascii_lowercase();
        self.menus.iter().position(|m| m.mnemonic == c)
    }

    /// Resolve a Ctrl+`key` chord to the command declaring it.
    pub fn command_for_shortcut(&self, key: char) -> Option<MenuCommand> {
        let key = key.to_ascii_lowercase();
        self.menus
            .iter()
            .flat_map(|m| m.items.iter())
            .find(|item| item.shortcut == Some(key))
            .and_then(MenuItem::command_kind)
    }

    /// Starting column of each title on the menu bar row. Titles are drawn as
    /// ` Title ` beginning at column 1.
    pub fn title_columns(&self) -> SmallVec<[u16; 6]> {
        let mut col = 1u16;
        let mut out = SmallVec::new();
        for m in &self.menus {
            out.push(col);
            col = col.saturating_add(m.title.chars().count() as u16 + 2);
        }
        out
    }
}

// -------------------------------------------------------------------------------------------------
// Navigation
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNav {
    Up,
    Down,
    Left,
    Right,
    Activate,
    Cancel,
    Mnemonic(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Navigation handled; the menu stays open.
    Moved,
    /// Menu closed without a command.
    Closed,
    /// Menu closed and the command should run.
    Activate(MenuCommand),
    /// Key had no effect.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMenu {
    pub menu: usize,
    pub item: usize,
    /// Highlighted child when a submenu is expanded.
    pub submenu: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    open: Option<OpenMenu>,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<OpenMenu> {
        self.open
    }

    pub fn open(&mut self, bar: &MenuBar, menu: usize) {
        if menu < bar.len() {
            trace!(target: "menu", menu = bar.menus[menu].title, "open");
            self.open = Some(OpenMenu {
                menu,
                item: 0,
                submenu: None,
            });
        }
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn handle(&mut self, bar: &MenuBar, nav: MenuNav) -> MenuOutcome {
        let Some(mut cur) = self.open else {
            return MenuOutcome::Ignored;
        };
        let Some(menu) = bar.menu(cur.menu) else {
            self.close();
            return MenuOutcome::Closed;
        };
        let item = &menu.items[cur.item];
        let outcome = match (nav, cur.submenu) {
            (MenuNav::Cancel, Some(_)) | (MenuNav::Left, Some(_)) => {
                cur.submenu = None;
                MenuOutcome::Moved
            }
            (MenuNav::Cancel, None) => {
                self.close();
                return MenuOutcome::Closed;
            }
            (MenuNav::Up, Some(sub)) => {
                let n = item.children().map_or(1, <[MenuItem]>::len);
                cur.submenu = Some((sub + n - 1) % n);
                MenuOutcome::Moved
            }
            (MenuNav::Down, Some(sub)) => {
                let n = item.children().map_or(1, <[MenuItem]>::len);
                cur.submenu = Some((sub + 1) % n);
                MenuOutcome::Moved
            }
            (MenuNav::Up, None) => {
                let n = menu.items.len();
                cur.item = (cur.item + n - 1) % n;
                MenuOutcome::Moved
            }
            (MenuNav::Down, None) => {
                cur.item = (cur.item + 1) % menu.items.len();
                MenuOutcome::Moved
            }
            (MenuNav::Right | MenuNav::Activate, None) if item.children().is_some() => {
                cur.submenu = Some(0);
                MenuOutcome::Moved
            }
            (MenuNav::Activate, sub) => {
                let chosen = match (sub, item.children()) {
                    (Some(i), Some(children)) => children.get(i).and_then(MenuItem::command_kind),
                    _ => item.command_kind(),
                };
                self.close();
                return match chosen {
                    Some(cmd) => {
                        trace!(target: "menu", command = ?cmd, "activate");
                        MenuOutcome::Activate(cmd)
                    }
                    None => MenuOutcome::Closed,
                };
            }
            (MenuNav::Right, _) => {
                cur = OpenMenu {
                    menu: (cur.menu + 1) % bar.len(),
                    item: 0,
                    submenu: None,
                };
                MenuOutcome::Moved
            }
            (MenuNav::Left, None) => {
                cur = OpenMenu {
                    menu: (cur.menu + bar.len() - 1) % bar.len(),
                    item: 0,
                    submenu: None,
                };
                MenuOutcome::Moved
            }
            (MenuNav::Mnemonic(c), _) => match bar.index_of_mnemonic(c) {
                Some(idx) => {
                    cur = OpenMenu {
                        menu: idx,
                        item: 0,
                        submenu: None,
                    };
                    MenuOutcome::Moved
                }
                None => MenuOutcome::Ignored,
            },
        };
        self.open = Some(cur);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(menu: &Menu) -> Vec<&str> {
        menu.items.iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn standard_bar_layout() {
        let bar = MenuBar::standard();
        let titles: Vec<_> = bar.menus().iter().map(|m| m.title).collect();
        assert_eq!(
            titles,
            vec!["File", "Edit", "Font", "FontType", "Color", "Undo&Redo"]
        );
        assert_eq!(labels(&bar.menus()[0]), vec!["New", "Open", "Save", "Exit"]);
        assert_eq!(labels(&bar.menus()[2]), vec!["Bold", "Plain", "Italic", "Size"]);
        assert_eq!(
            labels(&bar.menus()[3]),
            vec![
                "Times New Roman",
                "Helvetica",
                "Courier",
                "Arial",
                "Arial Black",
                "Century"
            ]
        );
        let size_labels: Vec<_> = bar.menus()[2].items[3]
            .children()
            .unwrap()
            .iter()
            .map(|i| i.label.clone())
            .collect();
        assert_eq!(
            size_labels,
            vec!["10", "12", "14", "16", "18", "20", "22", "24", "26", "28"]
        );
    }

    #[test]
    fn shortcuts_resolve_to_commands() {
        let bar = MenuBar::standard();
        assert_eq!(bar.command_for_shortcut('s'), Some(MenuCommand::Save));
        assert_eq!(bar.command_for_shortcut('E'), Some(MenuCommand::Exit));
        assert_eq!(bar.command_for_shortcut('x'), Some(MenuCommand::Cut));
        assert_eq!(bar.command_for_shortcut('z'), Some(MenuCommand::Undo));
        assert_eq!(bar.command_for_shortcut('y'), Some(MenuCommand::Redo));
        assert_eq!(bar.command_for_shortcut('q'), None);
        assert_eq!(
            bar.menus()[1].items[2].shortcut_label().as_deref(),
            Some("^V")
        );
    }

    #[test]
    fn title_columns_are_contiguous() {
        let bar = MenuBar::standard();
        assert_eq!(bar.title_columns().as_slice(), &[1, 7, 13, 19, 29, 36]);
    }

    #[test]
    fn navigate_and_activate() {
        let bar = MenuBar::standard();
        let mut state = MenuState::default();
        state.open(&bar, 0);
        assert_eq!(state.handle(&bar, MenuNav::Down), MenuOutcome::Moved);
        assert_eq!(state.handle(&bar, MenuNav::Down), MenuOutcome::Moved);
        assert_eq!(
            state.handle(&bar, MenuNav::Activate),
            MenuOutcome::Activate(MenuCommand::Save)
        );
        assert!(!state.is_open());
    }

    #[test]
    fn up_wraps_to_last_item() {
        let bar = MenuBar::standard();
        let mut state = MenuState::default();
        state.open(&bar, 5);
        state.handle(&bar, MenuNav::Up);
        assert_eq!(state.current().unwrap().item, 1);
    }

    #[test]
    fn left_right_switch_menus_with_wrap() {
        let bar = MenuBar::standard();
        let mut state = MenuState::default();
        state.open(&bar, 0);
        state.handle(&bar, MenuNav::Left);
        assert_eq!(state.current().unwrap().menu, 5);
        state.handle(&bar, MenuNav::Right);
        assert_eq!(state.current().unwrap().menu, 0);
    }

    #[test]
    fn size_submenu_navigation() {
        let bar = MenuBar::standard();
        let mut state = MenuState::default();
        state.open(&bar, 2);
        for _ in 0..3 {
            state.handle(&bar, MenuNav::Down);
        }
        assert_eq!(state.handle(&bar, MenuNav::Right), MenuOutcome::Moved);
        assert_eq!(state.current().unwrap().submenu, Some(0));
        state.handle(&bar, MenuNav::Down);
        state.handle(&bar, MenuNav::Down);
        let size = FontSize::new(14).unwrap();
        assert_eq!(
            state.handle(&bar, MenuNav::Activate),
            MenuOutcome::Activate(MenuCommand::SetSize(size))
        );
    }

    #[test]
    fn escape_closes_submenu_then_menu() {
        let bar = MenuBar::standard();
        let mut state = MenuState::default();
        state.open(&bar, 2);
        for _ in 0..3 {
            state.handle(&bar, MenuNav::Down);
        }
        state.handle(&bar, MenuNav::Activate);
        assert_eq!(state.handle(&bar, MenuNav::Cancel), MenuOutcome::Moved);
        assert!(state.is_open());
        assert_eq!(state.handle(&bar, MenuNav::Cancel), MenuOutcome::Closed);
        assert!(!state.is_open());
    }

    #[test]
    fn mnemonic_switches_open_menu() {
        let bar = MenuBar::standard();
        let mut state = MenuState::default();
        state.open(&bar, 0);
        assert_eq!(state.handle(&bar, MenuNav::Mnemonic('c')), MenuOutcome::Moved);
        assert_eq!(state.current().unwrap().menu, 4);
        assert_eq!(state.handle(&bar, MenuNav::Mnemonic('z')), MenuOutcome::Ignored);
    }

    #[test]
    fn closed_menu_ignores_navigation() {
        let bar = MenuBar::standard();
        let mut state = MenuState::default();
        assert_eq!(state.handle(&bar, MenuNav::Down), MenuOutcome::Ignored);
    }

    #[test]
    fn active_marks_follow_style() {
        let style = StyleState::default();
        assert!(MenuCommand::SetFamily(FontFamily::Courier).is_active(&style));
        assert!(MenuCommand::SetWeight(FontWeight::Plain).is_active(&style));
        assert!(!MenuCommand::SetWeight(FontWeight::Bold).is_active(&style));
        assert!(!MenuCommand::Save.is_active(&style));
    }
}
