//! Tests for the navigator.
use crate::core::event::{Event, Status};
use crate::core::keyboard::{Key, Modifiers, Named};
use crate::core::tree::{BranchNodes, Key as Node, Tree};
use crate::core::walker::Directive;
use crate::core::{Adapter, LayoutDirection, NodeId, Rectangle, Role, State, Vector};
use crate::{
    Bar, Change, Column, Config, Error, Flag, Flyout, Keymap, Level, Navigator, TreeMenu, Variant,
};

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

struct MenuBar {
    root: Node,
    file: BranchNodes,
    new: Node,
    recent: BranchNodes,
    quit: Node,
    edit: BranchNodes,
    copy: Node,
    help: Node,
}

fn menu_bar(tree: &mut Tree) -> MenuBar {
    let root = tree.root("bar");

    let file = tree.branch(root, "file", "&File");
    let new = tree.item(file.submenu, "new", "New");
    let _open = tree.item(file.submenu, "open", "Open");
    let recent = tree.branch(file.submenu, "recent", "Recent");
    let _ = tree.item(recent.submenu, "one", "One");
    let _ = tree.separator(file.submenu);
    let quit = tree.item(file.submenu, "quit", "Quit");

    let edit = tree.branch(root, "edit", "&Edit");
    let copy = tree.item(edit.submenu, "copy", "Copy");
    let _ = tree.item(edit.submenu, "paste", "Paste");

    let help = tree.item(root, "help", "Help");

    MenuBar {
        root,
        file,
        new,
        recent,
        quit,
        edit,
        copy,
        help,
    }
}

struct Fruits {
    root: Node,
    apple: Node,
    banana: Node,
    berry: Node,
    cherry: Node,
}

fn fruits(tree: &mut Tree) -> Fruits {
    let root = tree.root("fruits");

    Fruits {
        root,
        apple: tree.item(root, "apple", "Apple"),
        banana: tree.item(root, "banana", "Banana"),
        berry: tree.item(root, "berry", "Berry"),
        cherry: tree.item(root, "cherry", "Cherry"),
    }
}

struct Files {
    root: Node,
    docs: BranchNodes,
    cv: Node,
    letter: Node,
    music: Node,
}

fn files(tree: &mut Tree) -> Files {
    let root = tree.root("files");
    let docs = tree.branch(root, "docs", "Documents");
    let cv = tree.item(docs.submenu, "cv", "CV");
    let letter = tree.item(docs.submenu, "letter", "Letter");
    let music = tree.item(root, "music", "Music");

    Files {
        root,
        docs,
        cv,
        letter,
        music,
    }
}

/// Focuses a node the way a host does: input focus moves, then the event is
/// dispatched.
fn focus(navigator: &mut Navigator<Tree>, node: Node) {
    assert!(navigator.adapter_mut().focus(node));
    let _ = navigator.dispatch(Event::Focus(node)).expect("focus event");
}

fn press(navigator: &mut Navigator<Tree>, key: impl Into<Key>) -> Status {
    press_with(navigator, key, Modifiers::empty())
}

fn press_with(navigator: &mut Navigator<Tree>, key: impl Into<Key>, modifiers: Modifiers) -> Status {
    let target = navigator.adapter().focused().expect("focused node");

    navigator
        .dispatch(Event::KeyDown {
            target,
            key: key.into(),
            modifiers,
        })
        .expect("key event")
}

fn tab_stops(navigator: &Navigator<Tree>, root: Node) -> Vec<Node> {
    let tree = navigator.adapter();

    tree.descendants(root)
        .into_iter()
        .filter(|node| tree.state(*node).contains(State::TAB_STOP))
        .collect()
}

#[test]
fn registering_puts_the_tab_stop_on_the_first_available_item() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);
    tree.set_state(bar.file.branch, State::DISABLED, true);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    assert_eq!(navigator.variant_name(bar.root), Some("bar"));
    assert_eq!(navigator.first_available_item(bar.root), Some(bar.edit.branch));
    assert_eq!(navigator.tab_stop(bar.root), Some(bar.edit.opener));
    assert_eq!(navigator.first_available_item(bar.file.opener), Some(bar.new));
}

#[test]
fn arrows_move_along_the_bar_and_wrap_around() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);
    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    focus(&mut navigator, bar.file.opener);

    assert_eq!(press(&mut navigator, Named::ArrowRight), Status::Captured);
    assert_eq!(navigator.adapter().focused(), Some(bar.edit.opener));
    assert_eq!(tab_stops(&navigator, bar.root), vec![bar.edit.opener]);

    let _ = press(&mut navigator, Named::ArrowLeft);
    let _ = press(&mut navigator, Named::ArrowLeft);
    assert_eq!(navigator.adapter().focused(), Some(bar.help));

    let _ = press(&mut navigator, Named::Home);
    assert_eq!(navigator.adapter().focused(), Some(bar.file.opener));
}

#[test]
fn expanding_moves_into_the_submenu_and_escape_moves_back() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);
    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    focus(&mut navigator, bar.file.opener);
    let _ = press(&mut navigator, Named::ArrowDown);

    let tree = navigator.adapter();
    assert!(tree.is_expanded(bar.file.branch));
    assert!(tree.state(bar.file.opener).contains(State::SELECTED));
    assert_eq!(tree.focused(), Some(bar.new));
    assert_eq!(navigator.session().active(), Some(&NodeId::from("bar")));

    let _ = press(&mut navigator, Named::ArrowUp);
    assert_eq!(navigator.adapter().focused(), Some(bar.quit));

    // The separator is never a stop
    let _ = press(&mut navigator, Named::ArrowUp);
    assert_eq!(navigator.adapter().focused(), Some(bar.recent.opener));

    assert_eq!(press(&mut navigator, Named::Escape), Status::Captured);

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(bar.file.branch));
    assert!(!tree.state(bar.file.opener).contains(State::SELECTED));
    assert_eq!(tree.focused(), Some(bar.file.opener));
    assert_eq!(tab_stops(&navigator, bar.root), vec![bar.file.opener]);
    assert_eq!(navigator.session().active(), None);
}

#[test]
fn opening_a_branch_closes_the_other_paths() {
    let mut tree = Tree::new();
    let root = tree.root("nav");
    let a = tree.branch(root, "a", "A");
    let a1 = tree.item(a.submenu, "a1", "A1");
    let b = tree.branch(root, "b", "B");
    let _ = tree.item(b.submenu, "b1", "B1");

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Column).expect("register menu");

    focus(&mut navigator, a.opener);
    assert_eq!(press(&mut navigator, Named::Enter), Status::Captured);
    assert!(navigator.flush() > 0);

    assert_eq!(navigator.adapter().focused(), Some(a1));
    assert_eq!(navigator.tab_stop(root), Some(a1));

    assert!(navigator.open_branch(b.submenu));

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(a.branch));
    assert!(tree.is_expanded(b.branch));
    assert_eq!(tree.focused(), Some(a.opener));
    assert_eq!(tab_stops(&navigator, root), vec![a.opener]);

    assert!(!navigator.open_branch(b.opener));
}

#[test]
fn close_controls_close_their_branch() {
    let mut tree = Tree::new();
    let root = tree.root("nav");
    let a = tree.branch(root, "a", "A");
    let _ = tree.item(a.submenu, "a1", "A1");
    let close = tree.close_control(a.submenu, "close", "Close");

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Column).expect("register menu");

    assert!(navigator.open_branch(a.branch));
    assert!(navigator.focus_item(close, root).expect("focus"));
    assert!(navigator.action_item(close));

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(a.branch));
    assert_eq!(tree.focused(), Some(a.opener));
    assert_eq!(tab_stops(&navigator, root), vec![a.opener]);
}

#[test]
fn arrows_inside_of_a_bar_move_between_its_menus() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);
    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    focus(&mut navigator, bar.file.opener);
    let _ = press(&mut navigator, Named::ArrowDown);
    assert_eq!(navigator.adapter().focused(), Some(bar.new));

    assert_eq!(press(&mut navigator, Named::ArrowRight), Status::Captured);

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(bar.file.branch));
    assert!(tree.is_expanded(bar.edit.branch));
    assert_eq!(tree.focused(), Some(bar.copy));
    assert_eq!(navigator.session().active(), Some(&NodeId::from("bar")));

    assert_eq!(press(&mut navigator, Named::ArrowLeft), Status::Captured);

    let tree = navigator.adapter();
    assert!(tree.is_expanded(bar.file.branch));
    assert!(!tree.is_expanded(bar.edit.branch));
    assert_eq!(tree.focused(), Some(bar.new));

    // Deeper submenus still collapse into their branch
    let _ = press(&mut navigator, Named::ArrowDown);
    let _ = press(&mut navigator, Named::ArrowDown);
    assert_eq!(navigator.adapter().focused(), Some(bar.recent.opener));

    let _ = press(&mut navigator, Named::ArrowRight);
    assert!(navigator.adapter().is_expanded(bar.recent.branch));
    assert_eq!(
        navigator.adapter().focused(),
        navigator.first_available_item(bar.recent.branch)
    );

    let _ = press(&mut navigator, Named::ArrowLeft);

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(bar.recent.branch));
    assert!(tree.is_expanded(bar.file.branch));
    assert_eq!(tree.focused(), Some(bar.recent.opener));
}

#[test]
fn letters_jump_to_the_next_matching_item() {
    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(fruits.root, Column).expect("register menu");

    focus(&mut navigator, fruits.apple);

    assert_eq!(press(&mut navigator, Key::character("b")), Status::Captured);
    assert_eq!(navigator.adapter().focused(), Some(fruits.banana));

    assert_eq!(press(&mut navigator, Key::character("B")), Status::Captured);
    assert_eq!(navigator.adapter().focused(), Some(fruits.berry));

    // Letter jumps never wrap around
    assert_eq!(press(&mut navigator, Key::character("b")), Status::Ignored);
    assert_eq!(navigator.adapter().focused(), Some(fruits.berry));

    assert_eq!(
        press_with(&mut navigator, Key::character("c"), Modifiers::CTRL),
        Status::Ignored
    );
    assert_eq!(press(&mut navigator, Key::character("c")), Status::Captured);
    assert_eq!(navigator.adapter().focused(), Some(fruits.cherry));
    assert_eq!(navigator.tab_stop(fruits.root), Some(fruits.cherry));
}

#[test]
fn mnemonics_take_precedence_over_the_first_letter() {
    let mut tree = Tree::new();
    let root = tree.root("actions");
    let save = tree.item(root, "save", "Save");
    let save_as = tree.item(root, "save_as", "Save &As");
    let _ = tree.item(root, "select", "Select all");

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Column).expect("register menu");

    focus(&mut navigator, save);
    let _ = press(&mut navigator, Key::character("a"));

    assert_eq!(navigator.adapter().focused(), Some(save_as));
}

#[test]
fn keys_are_ignored_until_the_menu_is_focused() {
    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(fruits.root, Column).expect("register menu");

    assert!(navigator.adapter_mut().focus(fruits.apple));
    assert_eq!(press(&mut navigator, Named::ArrowDown), Status::Ignored);
    assert_eq!(navigator.adapter().focused(), Some(fruits.apple));
    assert!(!navigator.session().listeners(&NodeId::from("fruits")).key_down);

    let _ = navigator.dispatch(Event::Focus(fruits.apple));
    assert_eq!(press(&mut navigator, Named::ArrowDown), Status::Captured);
    assert_eq!(navigator.adapter().focused(), Some(fruits.banana));

    // Column menus are not transient, hovering does nothing
    assert!(!navigator.session().listeners(&NodeId::from("fruits")).mouse_over);
}

#[test]
fn right_to_left_swaps_expand_and_collapse() {
    let mut tree = Tree::new();
    let root = tree.root("nav");
    let a = tree.branch(root, "a", "A");
    let a1 = tree.item(a.submenu, "a1", "A1");
    let _ = tree.item(root, "b", "B");

    let config = Config {
        direction: LayoutDirection::Rtl,
        ..Config::default()
    };

    let mut navigator = Navigator::with_config(tree, config);
    navigator.register(root, Column).expect("register menu");

    focus(&mut navigator, a.opener);

    assert_eq!(press(&mut navigator, Named::ArrowLeft), Status::Captured);
    assert!(navigator.adapter().is_expanded(a.branch));
    assert_eq!(navigator.adapter().focused(), Some(a1));

    assert_eq!(press(&mut navigator, Named::ArrowRight), Status::Captured);
    assert!(!navigator.adapter().is_expanded(a.branch));
    assert_eq!(navigator.adapter().focused(), Some(a.opener));
}

#[test]
fn trees_walk_every_visible_node_and_select_it() {
    let mut tree = Tree::new();
    let files = files(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(files.root, TreeMenu).expect("register menu");

    focus(&mut navigator, files.docs.opener);

    // The first arrow opens in place, the second one enters
    assert_eq!(press(&mut navigator, Named::ArrowRight), Status::Captured);
    assert!(navigator.adapter().is_expanded(files.docs.branch));
    assert_eq!(navigator.adapter().focused(), Some(files.docs.opener));
    assert!(!navigator.adapter().state(files.docs.opener).contains(State::SELECTED));

    let _ = press(&mut navigator, Named::ArrowRight);
    assert_eq!(navigator.adapter().focused(), Some(files.cv));
    assert!(navigator.adapter().state(files.cv).contains(State::SELECTED));

    let _ = press(&mut navigator, Named::ArrowDown);
    let _ = press(&mut navigator, Named::ArrowDown);
    assert_eq!(navigator.adapter().focused(), Some(files.music));
    assert!(!navigator.adapter().state(files.cv).contains(State::SELECTED));

    // Trees do not wrap around
    assert_eq!(press(&mut navigator, Named::ArrowDown), Status::Captured);
    assert_eq!(navigator.adapter().focused(), Some(files.music));

    // CTRL moves without selecting
    let _ = press_with(&mut navigator, Named::ArrowUp, Modifiers::CTRL);
    assert_eq!(navigator.adapter().focused(), Some(files.letter));
    assert!(navigator.adapter().state(files.music).contains(State::SELECTED));

    let _ = press(&mut navigator, Named::End);
    assert_eq!(navigator.adapter().focused(), Some(files.music));
}

#[test]
fn collapsing_in_a_tree_moves_to_the_parent_first() {
    let mut tree = Tree::new();
    let files = files(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(files.root, TreeMenu).expect("register menu");

    assert!(navigator.open_branch(files.docs.branch));
    assert!(navigator.focus_item(files.letter, files.root).expect("focus"));
    focus(&mut navigator, files.letter);

    let _ = press(&mut navigator, Named::ArrowLeft);
    assert_eq!(navigator.adapter().focused(), Some(files.docs.opener));
    assert!(navigator.adapter().is_expanded(files.docs.branch));
    assert!(navigator.adapter().state(files.docs.branch).contains(State::SELECTED));

    let _ = press(&mut navigator, Named::ArrowLeft);
    assert!(!navigator.adapter().is_expanded(files.docs.branch));

    assert_eq!(
        navigator
            .get_target_item(files.root, Some(files.music), Directive::Previous)
            .expect("walk tree"),
        Some(files.docs.branch)
    );
}

#[test]
fn hovering_follows_a_click_in_transient_menus() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);
    let page = tree.root("page");
    let link = tree.item(page, "link", "Link");

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    focus(&mut navigator, bar.file.opener);

    // Hovering does nothing before a click
    let _ = navigator.dispatch(Event::MouseOver(bar.edit.opener));
    assert!(!navigator.adapter().is_expanded(bar.edit.branch));

    let status = navigator
        .dispatch(Event::Click(bar.file.opener))
        .expect("click");

    assert_eq!(status, Status::Captured);
    assert!(navigator.adapter().is_expanded(bar.file.branch));
    assert!(navigator.session().is_hovering());

    let _ = navigator.dispatch(Event::MouseOver(bar.edit.opener));

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(bar.file.branch));
    assert!(tree.is_expanded(bar.edit.branch));
    assert_eq!(tree.focused(), Some(bar.edit.opener));
    assert!(navigator.session().is_hovering());

    let _ = navigator.flush();

    assert_eq!(
        navigator.dispatch(Event::Click(link)).expect("click"),
        Status::Ignored
    );
    assert!(!navigator.adapter().is_expanded(bar.edit.branch));
    assert_eq!(navigator.session().active(), None);
    assert!(!navigator.session().is_hovering());
}

#[test]
fn hovering_a_leaf_keeps_hovering_on() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    focus(&mut navigator, bar.file.opener);
    let _ = navigator.dispatch(Event::Click(bar.file.opener));
    assert!(navigator.adapter().is_expanded(bar.file.branch));

    let _ = navigator.dispatch(Event::MouseOver(bar.help));

    assert!(!navigator.adapter().is_expanded(bar.file.branch));
    assert_eq!(navigator.adapter().focused(), Some(bar.help));
    assert_eq!(navigator.session().active(), Some(&NodeId::from("bar")));
    assert!(navigator.session().is_hovering());

    let _ = navigator.dispatch(Event::MouseOver(bar.edit.opener));

    assert!(navigator.adapter().is_expanded(bar.edit.branch));
    assert_eq!(navigator.adapter().focused(), Some(bar.edit.opener));
    assert!(navigator.session().is_hovering());
}

#[test]
fn activating_a_leaf_closes_transient_menus() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    assert!(navigator.open_branch(bar.edit.branch));
    assert!(navigator.focus_item(bar.copy, bar.root).expect("focus"));
    focus(&mut navigator, bar.copy);

    // The host runs the command itself
    assert_eq!(press(&mut navigator, Named::Enter), Status::Ignored);
    assert!(!navigator.adapter().is_expanded(bar.edit.branch));
    assert_eq!(navigator.session().active(), None);
}

#[test]
fn focusing_another_menu_closes_the_active_one_after_a_delay() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);
    let fruits = fruits(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");
    navigator.register(fruits.root, Column).expect("register menu");

    focus(&mut navigator, bar.file.opener);
    let _ = navigator.dispatch(Event::Click(bar.file.opener));
    let _ = navigator.flush();
    assert_eq!(navigator.adapter().focused(), Some(bar.new));

    focus(&mut navigator, fruits.banana);
    assert!(navigator.adapter().is_expanded(bar.file.branch));
    assert!(navigator.next_deadline().is_some());

    assert_eq!(navigator.advance(Instant::now() + Duration::from_secs(1)), 1);
    assert!(!navigator.adapter().is_expanded(bar.file.branch));
    assert_eq!(navigator.session().active(), None);
    assert_eq!(navigator.adapter().focused(), Some(fruits.banana));
}

#[test]
fn coming_back_in_time_keeps_the_menu_open() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);
    let fruits = fruits(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");
    navigator.register(fruits.root, Column).expect("register menu");

    focus(&mut navigator, bar.file.opener);
    let _ = navigator.dispatch(Event::Click(bar.file.opener));
    let _ = navigator.flush();

    focus(&mut navigator, fruits.banana);
    assert!(navigator.next_deadline().is_some());

    focus(&mut navigator, bar.new);
    assert_eq!(navigator.next_deadline(), None);

    assert_eq!(navigator.advance(Instant::now() + Duration::from_secs(1)), 0);
    assert!(navigator.adapter().is_expanded(bar.file.branch));
    assert_eq!(navigator.session().active(), Some(&NodeId::from("bar")));
}

#[test]
fn focus_falls_back_to_reachable_descendants() {
    let mut tree = Tree::new();
    let root = tree.root("nav");
    let a = tree.branch(root, "a", "A");
    let a1 = tree.item(a.submenu, "a1", "A1");
    let row = tree.item(root, "row", "Row");
    let check = tree.insert(Some(row), Role::Group, Some("row:check"), None);

    tree.set_focusable(a.opener, false);
    tree.set_focusable(row, false);
    tree.set_focusable(check, true);

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Column).expect("register menu");

    assert!(navigator.focus_item(row, root).expect("focus"));
    assert_eq!(navigator.adapter().focused(), Some(check));
    assert_eq!(navigator.tab_stop(root), Some(row));

    // The items of a closed submenu cannot be reached
    assert!(!navigator.focus_item(a.branch, root).expect("focus"));
    assert_eq!(navigator.adapter().focused(), Some(check));
    assert_eq!(navigator.tab_stop(root), Some(a.opener));

    assert!(navigator.open_branch(a.branch));
    assert!(navigator.focus_item(a.branch, root).expect("focus"));
    assert_eq!(navigator.adapter().focused(), Some(a1));
}

#[test]
fn nested_roots_belong_to_no_menu_until_registered() {
    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);
    let popup = tree.insert(Some(fruits.apple), Role::Root, Some("popup"), None);
    let inner = tree.item(popup, "inner", "Inner");

    let mut navigator = Navigator::new(tree);
    navigator.register(fruits.root, Column).expect("register menu");

    assert_eq!(navigator.root_of(fruits.apple), Some(fruits.root));
    assert_eq!(navigator.root_of(inner), None);
    assert_eq!(navigator.dispatch(Event::Click(inner)), Ok(Status::Ignored));

    navigator.register(popup, Column).expect("register menu");
    assert_eq!(navigator.root_of(inner), Some(popup));
    assert_eq!(navigator.tab_stop(popup), Some(inner));

    assert!(navigator.unregister(popup));
    assert!(!navigator.unregister(popup));
    assert_eq!(navigator.root_of(inner), None);
}

#[test]
fn only_one_tab_stop_per_menu() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    for item in [bar.help, bar.edit.branch, bar.copy, bar.new, bar.file.opener] {
        assert!(navigator.set_tab_stop(bar.root, item));
        assert_eq!(tab_stops(&navigator, bar.root).len(), 1);
    }

    assert!(!navigator.set_tab_stop(bar.root, bar.root));
    assert_eq!(navigator.tab_stop(bar.root), Some(bar.file.opener));
}

#[test]
fn disabling_the_tab_stop_moves_it_away() {
    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(fruits.root, Column).expect("register menu");

    focus(&mut navigator, fruits.apple);

    assert!(navigator.set_disabled(fruits.apple, true));
    assert_eq!(navigator.tab_stop(fruits.root), Some(fruits.banana));
    assert_eq!(navigator.adapter().focused(), Some(fruits.banana));
    assert_eq!(tab_stops(&navigator, fruits.root), vec![fruits.banana]);

    // Withdrawn items are skipped by navigation
    let _ = press(&mut navigator, Named::ArrowUp);
    assert_eq!(navigator.adapter().focused(), Some(fruits.cherry));

    assert!(!navigator.focus_item(fruits.apple, fruits.root).expect("focus"));
    assert!(navigator.set_disabled(fruits.apple, false));
    assert!(!navigator.set_disabled(fruits.apple, false));
    assert_eq!(navigator.tab_stop(fruits.root), Some(fruits.cherry));
}

#[test]
fn hiding_an_open_branch_closes_it() {
    let mut tree = Tree::new();
    let root = tree.root("nav");
    let a = tree.branch(root, "a", "A");
    let a1 = tree.item(a.submenu, "a1", "A1");
    let b = tree.item(root, "b", "B");

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Column).expect("register menu");

    assert!(navigator.open_branch(a.branch));
    assert!(navigator.focus_item(a1, root).expect("focus"));

    assert!(navigator.set_hidden(a.branch, true));

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(a.branch));
    assert_eq!(tree.focused(), Some(b));
    assert_eq!(navigator.tab_stop(root), Some(b));
}

#[test]
fn external_changes_are_followed() {
    let mut tree = Tree::new();
    let root = tree.root("nav");
    let a = tree.branch(root, "a", "A");
    let a1 = tree.item(a.submenu, "a1", "A1");
    let b = tree.branch(root, "b", "B");

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Column).expect("register menu");

    assert!(navigator.open_branch(a.branch));
    assert!(navigator.focus_item(a1, root).expect("focus"));

    navigator
        .adapter_mut()
        .set_state(b.submenu, State::EXPANDED, true);
    navigator.notify(b.submenu, Flag::Expanded, true);

    let tree = navigator.adapter();
    assert!(!tree.is_expanded(a.branch));
    assert!(tree.state(b.opener).contains(State::SELECTED));
    assert_eq!(tree.focused(), Some(a.opener));

    navigator
        .adapter_mut()
        .set_state(b.submenu, State::EXPANDED, false);
    navigator.notify(b.submenu, Flag::Expanded, false);

    assert!(!navigator.adapter().state(b.opener).contains(State::SELECTED));
}

#[test]
fn subscribers_see_every_change() {
    let mut tree = Tree::new();
    let root = tree.root("nav");
    let a = tree.branch(root, "a", "A");
    let _ = tree.item(a.submenu, "a1", "A1");

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Column).expect("register menu");

    let changes = Rc::new(RefCell::new(Vec::new()));
    let subscription = navigator.subscribe({
        let changes = changes.clone();
        move |change: &Change| changes.borrow_mut().push(change.clone())
    });

    assert!(navigator.open_branch(a.branch));

    assert_eq!(
        *changes.borrow(),
        vec![
            Change {
                id: Some(NodeId::from("a:submenu")),
                flag: Flag::Expanded,
                value: true,
            },
            Change {
                id: Some(NodeId::from("a:opener")),
                flag: Flag::Selected,
                value: true,
            },
        ]
    );

    assert!(navigator.unsubscribe(subscription));
    assert!(navigator.close_branch(a.branch));
    assert_eq!(changes.borrow().len(), 2);
}

#[test]
fn form_state_is_restored() {
    let mut tree = Tree::new();
    let files = files(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(files.root, TreeMenu).expect("register menu");

    assert!(navigator.open_branch(files.docs.branch));
    assert!(navigator.select(files.letter));

    let saved = navigator.save_state(files.root);
    assert_eq!(saved.open, vec![NodeId::from("docs")]);
    assert_eq!(saved.selected, vec![NodeId::from("letter")]);

    assert!(navigator.close_branch(files.docs.branch));
    assert!(navigator.select(files.music));

    assert!(navigator.restore_state(files.root, &saved));

    let tree = navigator.adapter();
    assert!(tree.is_expanded(files.docs.branch));
    assert!(tree.state(files.letter).contains(State::SELECTED));
    assert!(!tree.state(files.music).contains(State::SELECTED));
    assert!(!tree.state(files.cv).contains(State::SELECTED));

    assert!(!navigator.restore_state(files.root, &saved));
}

#[test]
fn form_state_of_a_branch_includes_the_branch_itself() {
    let mut tree = Tree::new();
    let files = files(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(files.root, TreeMenu).expect("register menu");

    assert!(navigator.open_branch(files.docs.branch));
    assert!(navigator.select(files.cv));

    let saved = navigator.save_state(files.docs.branch);
    assert!(saved.is_open(&NodeId::from("docs")));
    assert!(saved.is_selected(&NodeId::from("cv")));
    assert!(!saved.is_selected(&NodeId::from("letter")));

    assert!(navigator.close_branch(files.docs.branch));
    assert!(navigator.restore_state(files.docs.branch, &saved));
    assert!(navigator.adapter().is_expanded(files.docs.branch));
}

#[cfg(feature = "serde")]
#[test]
fn form_state_survives_ron() {
    let saved = crate::FormState {
        open: vec![NodeId::from("docs")],
        selected: vec![NodeId::from("letter"), NodeId::from("cv")],
    };

    let content = saved.to_ron().expect("serialize form state");

    assert_eq!(crate::FormState::from_ron(&content), Ok(saved));
    assert!(crate::FormState::from_ron("(open: 42)").is_err());
}

#[test]
fn oversized_submenus_collide_with_both_edges() {
    let mut tree = Tree::new();
    let root = tree.root("flyout");
    let more = tree.branch(root, "more", "More");
    let _ = tree.item(more.submenu, "first", "First");

    tree.set_viewport(Rectangle::new(0.0, 0.0, 200.0, 100.0));
    tree.set_bounds(more.opener, Rectangle::new(0.0, 0.0, 100.0, 20.0));
    tree.set_bounds(more.submenu, Rectangle::new(100.0, 10.0, 80.0, 150.0));

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Flyout).expect("register menu");

    assert!(navigator.open_branch(more.branch));
    assert_eq!(navigator.flush(), 1);

    let tree = navigator.adapter();
    let state = tree.state(more.submenu);
    assert!(state.contains(State::RAISED | State::NORTH));
    assert!(!state.contains(State::MIRRORED));
    assert_eq!(tree.offset(more.submenu), Vector::new(0.0, -60.0));

    assert!(navigator.close_branch(more.branch));

    let tree = navigator.adapter();
    assert!(!tree.state(more.submenu).intersects(State::COLLISION));
    assert_eq!(tree.offset(more.submenu), Vector::ZERO);
}

#[test]
fn submenus_reaching_past_the_trailing_edge_are_mirrored() {
    let mut tree = Tree::new();
    let root = tree.root("flyout");
    let more = tree.branch(root, "more", "More");
    let _ = tree.item(more.submenu, "first", "First");

    tree.set_viewport(Rectangle::new(0.0, 0.0, 200.0, 100.0));
    tree.set_bounds(more.opener, Rectangle::new(120.0, 0.0, 60.0, 20.0));
    tree.set_bounds(more.submenu, Rectangle::new(180.0, 0.0, 60.0, 40.0));

    let mut navigator = Navigator::new(tree);
    navigator.register(root, Flyout).expect("register menu");

    assert!(navigator.open_branch(more.branch));

    let placement = navigator
        .detect_collision(more.submenu)
        .expect("measured submenu");

    assert!(placement.mirrored);
    assert!(!placement.south);
    assert_eq!(navigator.adapter().state(more.submenu) & State::COLLISION, State::MIRRORED);
}

#[test]
fn focus_token_survives_content_replacement() {
    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(fruits.root, Column).expect("register menu");

    focus(&mut navigator, fruits.banana);

    let token = navigator.focus_token(fruits.root).expect("focus token");
    assert_eq!(token.item, NodeId::from("banana"));

    let tree = navigator.adapter_mut();
    tree.remove(fruits.banana);
    let banana = tree.item(fruits.root, "banana", "Banana");
    assert_eq!(tree.focused(), None);

    assert!(navigator.content_replaced(&token).expect("restore focus"));
    assert_eq!(navigator.adapter().focused(), Some(banana));
    assert_eq!(navigator.tab_stop(fruits.root), Some(banana));

    navigator.adapter_mut().remove(banana);

    assert!(navigator.content_replaced(&token).expect("restore focus"));
    assert_eq!(navigator.adapter().focused(), Some(fruits.apple));
}

#[test]
fn lost_focus_is_brought_back() {
    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(fruits.root, Column).expect("register menu");

    focus(&mut navigator, fruits.berry);

    // Clicking on nothing leaves focus nowhere
    navigator.adapter_mut().blur();
    let _ = navigator.dispatch(Event::Blur(fruits.berry));
    assert_eq!(navigator.flush(), 1);
    assert_eq!(navigator.adapter().focused(), None);

    // Removing the focused item does not
    focus(&mut navigator, fruits.berry);
    navigator.adapter_mut().blur();
    let _ = navigator.dispatch(Event::Blur(fruits.berry));
    navigator.adapter_mut().remove(fruits.berry);

    assert_eq!(navigator.flush(), 1);
    assert_eq!(navigator.adapter().focused(), Some(fruits.apple));
}

#[test]
fn invalid_keymaps_are_rejected() {
    #[derive(Debug)]
    struct Broken;

    impl Variant for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn keymap(&self, _level: Level) -> Keymap {
            Keymap::vertical().bind(Named::PageDown, Directive::Child)
        }
    }

    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);
    let mut navigator = Navigator::new(tree);

    assert_eq!(
        navigator.register(fruits.root, Broken),
        Err(Error::InvalidKeymap {
            variant: "broken",
            key: Key::Named(Named::PageDown),
            directive: Directive::Child,
        })
    );
    assert_eq!(navigator.register(fruits.apple, Column), Err(Error::NotARoot));
    assert!(!navigator.is_registered(fruits.root));
}

#[test]
fn unregistered_roots_are_errors() {
    let mut tree = Tree::new();
    let fruits = fruits(&mut tree);
    let mut navigator = Navigator::new(tree);

    assert_eq!(
        navigator.key_activator(
            fruits.apple,
            &Key::Named(Named::ArrowDown),
            fruits.root,
            Modifiers::empty()
        ),
        Err(Error::UnregisteredRoot(NodeId::from("fruits")))
    );
    assert_eq!(
        navigator.focus_item(fruits.apple, fruits.root),
        Err(Error::UnregisteredRoot(NodeId::from("fruits")))
    );

    // Events of nodes outside of any menu are ignored
    assert_eq!(
        navigator.dispatch(Event::Click(fruits.apple)),
        Ok(Status::Ignored)
    );
}

#[test]
fn stale_nodes_do_nothing() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    let edit = bar.edit;
    navigator.adapter_mut().remove(edit.branch);

    assert!(!navigator.open_branch(edit.branch));
    assert!(!navigator.close_branch(edit.opener));
    assert!(!navigator.action_item(bar.copy));
    assert_eq!(navigator.focus_item(bar.copy, bar.root), Ok(false));
    assert_eq!(
        navigator.get_target_item(bar.root, Some(bar.copy), Directive::Next),
        Ok(None)
    );
    assert_eq!(navigator.dispatch(Event::Click(bar.copy)), Ok(Status::Ignored));
    assert_eq!(navigator.dispatch(Event::Focus(edit.opener)), Ok(Status::Ignored));
    assert_eq!(navigator.root_of(bar.copy), None);
}

#[test]
fn unmounting_forgets_everything() {
    let mut tree = Tree::new();
    let bar = menu_bar(&mut tree);

    let mut navigator = Navigator::new(tree);
    navigator.register(bar.root, Bar).expect("register menu");

    focus(&mut navigator, bar.file.opener);
    let _ = navigator.dispatch(Event::Click(bar.file.opener));
    assert!(!navigator.session().timers().is_empty());

    navigator.unmount();

    assert!(!navigator.is_registered(bar.root));
    assert!(navigator.session().timers().is_empty());
    assert_eq!(navigator.session().active(), None);
    assert_eq!(navigator.flush(), 0);
}
