//! Frame loop behaviour driven through recording fakes

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{
    count, new_trace, position, take, test_config, FakeGraphics, FakePlatform, PlatformControls, RecordingUi,
    SharedSink, Trace, MAIN,
};
use nmtk_core::config::FormFactor;
use nmtk_core::diagnostics::{FeatureError, FeatureKind};
use nmtk_core::events::{Key, MouseButton, PlatformEvent, WindowId};
use nmtk_core::menu::{MenuAction, MenuGroup};
use nmtk_core::page::FnPage;
use nmtk_core::ui::ImmediateUi;
use nmtk_core::{FrameOrchestrator, ShellContext, ShellError, ShellState, UiLayer, Widgets};

struct Harness {
    trace: Trace,
    controls: PlatformControls,
    orchestrator: FrameOrchestrator,
    context: ShellContext,
    sink: SharedSink,
}

fn harness_with(ui: Box<dyn UiLayer>, viewports: bool, trace: Trace) -> Harness {
    nmtk_core::foundation::logging::init_for_tests();
    let (platform, controls) = FakePlatform::new(&trace);
    let orchestrator = FrameOrchestrator::new(
        test_config(viewports),
        Box::new(platform),
        Box::new(FakeGraphics::new(&trace)),
        ui,
    )
    .unwrap();
    let sink = SharedSink::default();
    let context = ShellContext::with_sink(sink.clone());
    take(&trace);
    Harness { trace, controls, orchestrator, context, sink }
}

fn recording_harness(configure: impl FnOnce(&mut RecordingUi)) -> Harness {
    let trace = new_trace();
    let mut ui = RecordingUi::new(&trace);
    configure(&mut ui);
    harness_with(Box::new(ui), false, trace)
}

fn text_page(name: &'static str) -> FnPage<impl FnMut(&mut dyn Widgets) -> Result<(), FeatureError>> {
    FnPage::new(name, move |ui: &mut dyn Widgets| {
        ui.text(name);
        Ok(())
    })
}

fn item(label: &'static str) -> impl FnMut(&mut dyn Widgets) -> Result<(), FeatureError> {
    move |ui: &mut dyn Widgets| {
        ui.menu_item(label);
        Ok(())
    }
}

#[test]
fn test_single_frame_trace_without_events() {
    let mut h = recording_harness(|_| {});
    let dispatched = Rc::new(Cell::new(0));
    let counter = Rc::clone(&dispatched);

    h.context.register_page(text_page("Home"));
    h.context.register_page(text_page("Settings"));
    h.context.register_menu(MenuGroup::new("File").with_item(item("Open")).with_item(item("Exit")));
    h.context.subscribe(move |_| counter.set(counter.get() + 1));

    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::Running);

    let expected = [
        "set_display_size(800x600)",
        "new_frame",
        "dock_space",
        "begin_menu(File)",
        "menu_item(Open)",
        "menu_item(Exit)",
        "end_menu",
        "begin_window(Home)",
        "text(Home)",
        "end_window",
        "begin_window(Settings)",
        "text(Settings)",
        "end_window",
        "render",
        "clear",
        "render_draw_list",
        "swap_buffers",
    ];
    assert_eq!(take(&h.trace), expected);
    assert_eq!(dispatched.get(), 0);
    assert!(h.sink.0.borrow().is_empty());
}

#[test]
fn test_failing_page_does_not_affect_others() {
    let mut h = recording_harness(|_| {});
    h.context.register_page(FnPage::new("Home", |_: &mut dyn Widgets| panic!("home exploded")));
    h.context.register_page(text_page("Settings"));

    h.orchestrator.step(&mut h.context).unwrap();

    let trace = take(&h.trace);
    assert!(position(&trace, "text(Settings)").is_some());
    assert_eq!(count(&trace, "end_window"), 2);

    let faults = h.sink.0.borrow();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].kind, FeatureKind::Page);
    assert_eq!(faults[0].name, "Home");
    assert!(faults[0].panicked);
}

#[test]
fn test_every_page_attempted_once_with_balanced_containers() {
    for failing in 0..4 {
        let mut h = recording_harness(|_| {});
        let attempts = Rc::new(RefCell::new(Vec::new()));
        for index in 0..4 {
            let attempts = Rc::clone(&attempts);
            h.context.register_page(FnPage::new(format!("Page {index}"), move |_: &mut dyn Widgets| {
                attempts.borrow_mut().push(index);
                if index == failing {
                    Err(FeatureError::custom("configured to fail"))
                } else {
                    Ok(())
                }
            }));
        }

        h.orchestrator.step(&mut h.context).unwrap();

        let trace = take(&h.trace);
        assert_eq!(*attempts.borrow(), vec![0, 1, 2, 3]);
        assert_eq!(trace.iter().filter(|e| e.starts_with("begin_window")).count(), 4);
        assert_eq!(count(&trace, "end_window"), 4);
        assert_eq!(h.sink.0.borrow().len(), 1);
    }
}

#[test]
fn test_collapsed_page_is_ended_but_not_rendered() {
    let mut h = recording_harness(|ui| {
        ui.collapsed.insert("Home".to_string());
    });
    h.context.register_page(text_page("Home"));

    h.orchestrator.step(&mut h.context).unwrap();

    let trace = take(&h.trace);
    assert_eq!(count(&trace, "begin_window(Home)"), 1);
    assert_eq!(count(&trace, "end_window"), 1);
    assert!(position(&trace, "text(Home)").is_none());
}

#[test]
fn test_menu_close_only_after_successful_open() {
    let mut h = recording_harness(|ui| {
        ui.closed_menus.insert("Edit".to_string());
    });
    h.context.register_menu(MenuGroup::new("File").with_item(item("Open")));
    h.context.register_menu(MenuGroup::new("Edit").with_item(item("Undo")));
    h.context.register_menu(MenuGroup::new("View").with_item(item("Stats")));

    h.orchestrator.step(&mut h.context).unwrap();

    let menus: Vec<String> = take(&h.trace)
        .into_iter()
        .filter(|e| e.contains("menu"))
        .collect();
    let expected = [
        "begin_menu(File)",
        "menu_item(Open)",
        "end_menu",
        "begin_menu(Edit)",
        "begin_menu(View)",
        "menu_item(Stats)",
        "end_menu",
    ];
    assert_eq!(menus, expected);
}

#[test]
fn test_failing_menu_item_keeps_pairing_and_later_items() {
    let mut h = recording_harness(|_| {});
    h.context.register_menu(
        MenuGroup::new("File")
            .with_item(|_: &mut dyn Widgets| -> Result<(), FeatureError> { Err(FeatureError::custom("broken")) })
            .with_item(item("Exit")),
    );

    h.orchestrator.step(&mut h.context).unwrap();

    let trace = take(&h.trace);
    assert!(position(&trace, "menu_item(Exit)").is_some());
    assert_eq!(count(&trace, "end_menu"), 1);
    assert_eq!(h.sink.0.borrow()[0].name, "File/0");
}

#[test]
fn test_events_reach_ui_and_every_subscriber_in_order() {
    let mut h = recording_harness(|_| {});
    let seen = Rc::new(RefCell::new(Vec::new()));
    for id in 0..3 {
        let seen = Rc::clone(&seen);
        h.context.subscribe(move |event| seen.borrow_mut().push((id, event.clone())));
    }
    let moved = PlatformEvent::MouseMoved { window: MAIN, x: 3.0, y: 4.0 };
    let key = PlatformEvent::KeyInput { window: MAIN, key: Key::Tab, pressed: true };
    h.controls.push(moved.clone());
    h.controls.push(key.clone());

    h.orchestrator.step(&mut h.context).unwrap();

    let expected = vec![
        (0, moved.clone()),
        (1, moved.clone()),
        (2, moved),
        (0, key.clone()),
        (1, key.clone()),
        (2, key),
    ];
    assert_eq!(*seen.borrow(), expected);

    let trace = take(&h.trace);
    assert_eq!(count(&trace, "process_event"), 2);
    assert!(position(&trace, "process_event") < position(&trace, "new_frame"));
}

#[test]
fn test_failing_subscriber_does_not_stop_dispatch() {
    let mut h = recording_harness(|_| {});
    let reached = Rc::new(Cell::new(false));
    let flag = Rc::clone(&reached);
    h.context.subscribe(|_| panic!("subscriber bug"));
    h.context.subscribe(move |_| flag.set(true));
    h.controls.push(PlatformEvent::MouseWheel { window: MAIN, delta_x: 0.0, delta_y: 1.0 });

    h.orchestrator.step(&mut h.context).unwrap();

    assert!(reached.get());
    let faults = h.sink.0.borrow();
    assert_eq!(faults.len(), 1);
    assert_eq!(faults[0].kind, FeatureKind::InputSubscriber);
}

#[test]
fn test_resize_is_visible_before_first_container() {
    let mut h = recording_harness(|_| {});
    h.context.register_page(text_page("Home"));
    h.orchestrator.step(&mut h.context).unwrap();
    take(&h.trace);

    h.controls.drawable.set((1024, 768));
    h.controls.push(PlatformEvent::WindowResized { window: MAIN, width: 1024, height: 768 });
    h.orchestrator.step(&mut h.context).unwrap();

    let trace = take(&h.trace);
    let resized = position(&trace, "set_display_size(1024x768)").unwrap();
    let viewport = position(&trace, "set_viewport(1024x768)").unwrap();
    let first_window = position(&trace, "begin_window(Home)").unwrap();
    assert!(viewport < first_window);
    assert!(resized < first_window);
}

#[test]
fn test_drawable_change_without_resize_event() {
    let mut h = recording_harness(|_| {});
    h.context.register_page(text_page("Home"));
    h.orchestrator.step(&mut h.context).unwrap();
    take(&h.trace);

    h.controls.drawable.set((1600, 1200));
    h.orchestrator.step(&mut h.context).unwrap();

    let trace = take(&h.trace);
    let viewport = position(&trace, "set_viewport(1600x1200)").unwrap();
    let display = position(&trace, "set_display_size(1600x1200)").unwrap();
    let new_frame = position(&trace, "new_frame").unwrap();
    let first_window = position(&trace, "begin_window(Home)").unwrap();
    assert!(viewport < display && display < new_frame && new_frame < first_window);
    assert_eq!(count(&trace, "set_viewport(1600x1200)"), 1);
    assert_eq!(count(&trace, "process_event"), 0);
}

#[test]
fn test_quit_event_stops_at_next_frame() {
    let mut h = recording_harness(|_| {});
    h.controls.push(PlatformEvent::Quit);

    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::Running);
    assert!(position(&take(&h.trace), "swap_buffers").is_some());

    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::ShuttingDown);
    assert!(take(&h.trace).is_empty());

    let err = h.orchestrator.step(&mut h.context).unwrap_err();
    assert!(matches!(
        err,
        ShellError::InvalidState { expected: ShellState::Running, found: ShellState::ShuttingDown }
    ));
}

#[test]
fn test_main_window_close_quits_but_secondary_close_does_not() {
    let mut h = recording_harness(|_| {});
    h.controls.push(PlatformEvent::WindowClosed { window: WindowId(5) });
    h.orchestrator.step(&mut h.context).unwrap();
    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::Running);

    h.controls.push(PlatformEvent::WindowClosed { window: MAIN });
    h.orchestrator.step(&mut h.context).unwrap();
    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::ShuttingDown);
}

#[test]
fn test_quit_handle_from_menu_action() {
    let mut h = recording_harness(|_| {});
    let quit = h.context.quit_handle();
    h.context.register_menu(MenuGroup::new("File").with_item(MenuAction::new("Exit", move || {
        quit.request();
        Ok(())
    })));

    h.orchestrator.step(&mut h.context).unwrap();
    assert_eq!(h.orchestrator.state(), ShellState::Running);

    // RecordingUi never reports a selection; any clone of the handle works.
    h.context.quit_handle().request();
    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::ShuttingDown);
}

#[test]
fn test_shutdown_releases_in_order() {
    let h = recording_harness(|_| {});
    let state = h.orchestrator.shutdown();

    assert_eq!(state, ShellState::Terminated);
    assert_eq!(
        take(&h.trace),
        ["graphics.shutdown", "release_viewports", "ui.shutdown", "platform.shutdown"]
    );
}

#[test]
fn test_run_loops_until_quit_then_shuts_down() {
    let h = recording_harness(|_| {});
    let Harness { trace, controls, orchestrator, mut context, .. } = h;
    controls.push(PlatformEvent::Quit);

    orchestrator.run(&mut context).unwrap();

    let trace = take(&trace);
    assert_eq!(count(&trace, "swap_buffers"), 1);
    assert_eq!(trace.last().map(String::as_str), Some("platform.shutdown"));
}

#[test]
fn test_context_restored_after_secondary_windows() {
    let trace = new_trace();
    let ui = RecordingUi::new(&trace);
    let mut h = harness_with(Box::new(ui), true, trace);

    h.orchestrator.step(&mut h.context).unwrap();

    let trace = take(&h.trace);
    let render = position(&trace, "ui.render_platform_windows").unwrap();
    let secondary = position(&trace, "make_current(Some(WindowId(2)))").unwrap();
    let restored = position(&trace, "make_current(Some(WindowId(1)))").unwrap();
    let clear = position(&trace, "clear").unwrap();
    assert!(render < secondary && secondary < restored && restored < clear);
    assert_eq!(h.controls.current.get(), Some(MAIN));
}

#[test]
fn test_handheld_uses_density_font_scale() {
    let trace = new_trace();
    let (mut platform, _controls) = FakePlatform::new(&trace);
    platform.dpi = Some(320.0);
    let config = nmtk_core::config::ShellConfig {
        form_factor: FormFactor::Handheld,
        frame_interval_ms: 0,
        ..nmtk_core::config::ShellConfig::default()
    };

    let orchestrator = FrameOrchestrator::new(
        config,
        Box::new(platform),
        Box::new(FakeGraphics::new(&trace)),
        Box::new(RecordingUi::new(&trace)),
    )
    .unwrap();

    assert!(position(&take(&trace), "set_font_scale(2)").is_some());
    assert!(!orchestrator.ui().config_flags().contains(nmtk_core::config::UiConfigFlags::VIEWPORTS));
}

#[test]
fn test_dragged_panel_gets_its_own_window_and_returns_when_closed() {
    let trace = new_trace();
    let mut h = harness_with(Box::new(ImmediateUi::new()), true, trace);
    h.context.register_page(text_page("Home"));

    h.controls.push(PlatformEvent::MouseMoved { window: MAIN, x: 50.0, y: 5.0 });
    h.controls.push(PlatformEvent::MouseButton { window: MAIN, button: MouseButton::Left, pressed: true });
    h.orchestrator.step(&mut h.context).unwrap();

    h.controls.push(PlatformEvent::MouseMoved { window: MAIN, x: -1000.0, y: 5.0 });
    h.orchestrator.step(&mut h.context).unwrap();
    let trace = take(&h.trace);
    assert!(position(&trace, "create_viewport_window(Home)").is_some());
    assert!(position(&trace, "swap_viewport(2)").is_some());
    assert_eq!(h.controls.current.get(), Some(MAIN));

    h.controls.push(PlatformEvent::MouseButton { window: MAIN, button: MouseButton::Left, pressed: false });
    h.orchestrator.step(&mut h.context).unwrap();
    take(&h.trace);

    h.controls.push(PlatformEvent::WindowClosed { window: WindowId(2) });
    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::Running);
    let trace = take(&h.trace);
    assert!(position(&trace, "destroy_viewport_window(2)").is_some());
    assert!(position(&trace, "swap_viewport(2)").is_none());
}

#[test]
fn test_secondary_window_failures_skip_only_that_window() {
    let trace = new_trace();
    let mut h = harness_with(Box::new(ImmediateUi::new()), true, trace);
    h.context.register_page(text_page("Home"));
    h.controls.fail_viewports.set(true);

    h.controls.push(PlatformEvent::MouseMoved { window: MAIN, x: 50.0, y: 5.0 });
    h.controls.push(PlatformEvent::MouseButton { window: MAIN, button: MouseButton::Left, pressed: true });
    h.orchestrator.step(&mut h.context).unwrap();
    h.controls.push(PlatformEvent::MouseMoved { window: MAIN, x: -1000.0, y: 5.0 });
    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::Running);

    let trace = take(&h.trace);
    let failed = position(&trace, "create_viewport_window(Home)").unwrap();
    let restored = position(&trace, "make_current(Some(WindowId(1)))").unwrap();
    let swap = position(&trace, "swap_buffers").unwrap();
    assert!(failed < restored && restored < swap);
    assert!(position(&trace, "swap_viewport(2)").is_none());
    assert_eq!(h.controls.current.get(), Some(MAIN));

    // Creation is retried once the platform recovers; a failing swap is skipped too
    h.controls.fail_viewports.set(false);
    h.orchestrator.step(&mut h.context).unwrap();
    assert!(position(&take(&h.trace), "swap_viewport(2)").is_some());

    h.controls.fail_viewports.set(true);
    assert_eq!(h.orchestrator.step(&mut h.context).unwrap(), ShellState::Running);
    let trace = take(&h.trace);
    let swapped = position(&trace, "swap_viewport(2)").unwrap();
    let restored = position(&trace, "make_current(Some(WindowId(1)))").unwrap();
    assert!(swapped < restored);
    assert_eq!(count(&trace, "swap_buffers"), 1);
    assert!(h.sink.0.borrow().is_empty());
}

#[test]
fn test_software_keyboard_follows_text_focus() {
    let trace = new_trace();
    let (mut platform, controls) = FakePlatform::new(&trace);
    platform.software_keyboard = true;
    let mut orchestrator = FrameOrchestrator::new(
        test_config(false),
        Box::new(platform),
        Box::new(FakeGraphics::new(&trace)),
        Box::new(ImmediateUi::new()),
    )
    .unwrap();
    let mut context = ShellContext::with_sink(SharedSink::default());
    let name = Rc::new(RefCell::new(String::new()));
    let bound = Rc::clone(&name);
    context.register_page(FnPage::new("Home", move |ui: &mut dyn Widgets| {
        ui.input_text("Name", &mut bound.borrow_mut());
        Ok(())
    }));

    controls.push(PlatformEvent::MouseMoved { window: MAIN, x: 10.0, y: 30.0 });
    controls.push(PlatformEvent::MouseButton { window: MAIN, button: MouseButton::Left, pressed: true });
    controls.push(PlatformEvent::MouseButton { window: MAIN, button: MouseButton::Left, pressed: false });
    orchestrator.step(&mut context).unwrap();
    take(&trace);

    controls.push(PlatformEvent::TextInput { window: MAIN, ch: 'a' });
    orchestrator.step(&mut context).unwrap();
    assert_eq!(count(&take(&trace), "start_text_input"), 1);
    assert_eq!(name.borrow().as_str(), "a");

    controls.push(PlatformEvent::KeyInput { window: MAIN, key: Key::Enter, pressed: true });
    orchestrator.step(&mut context).unwrap();
    orchestrator.step(&mut context).unwrap();
    let trace = take(&trace);
    assert_eq!(count(&trace, "stop_text_input"), 1);
    assert_eq!(count(&trace, "start_text_input"), 0);
}
