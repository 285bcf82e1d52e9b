//! Integration tests for box layouts over the native toolkit.

use horizon_trellis::layout::{BoxLayout, LayoutItem, hbox, vbox};
use horizon_trellis::{
    LayoutError, Orientation, RectI, SizeI, SizerChild, Toolkit, TrellisConfig, TrellisError,
    Widget,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("horizon_trellis=trace,horizon_trellis_core=debug")
        .with_test_writer()
        .try_init();
}

fn frame_with_buttons(toolkit: &Toolkit, count: usize) -> (Widget, Vec<Widget>) {
    let frame = Widget::top_level(toolkit, SizeI::new(10, 10)).unwrap();
    let buttons = (0..count)
        .map(|_| frame.child(SizeI::new(80, 20)).unwrap())
        .collect();
    (frame, buttons)
}

#[test]
fn test_stretched_buttons_share_height() {
    init_tracing();
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 3);

    let column = vbox(&frame).unwrap();
    for button in &buttons {
        column.append(button.layout().stretch(1).justify().margin_px(0));
    }
    frame.set_size(SizeI::new(300, 90)).unwrap();

    for (i, button) in buttons.iter().enumerate() {
        assert_eq!(
            button.geometry(),
            Some(RectI::new(0, 30 * i as i32, 300, 30)),
            "button {i}"
        );
    }
}

#[test]
fn test_stretched_buttons_with_default_border() {
    let toolkit = Toolkit::new(TrellisConfig::default().with_default_border(4));
    let (frame, buttons) = frame_with_buttons(&toolkit, 3);

    let column = vbox(&frame).unwrap();
    for button in &buttons {
        &column << button.layout().stretch(1).justify();
    }
    frame.set_size(SizeI::new(300, 90)).unwrap();

    for (i, button) in buttons.iter().enumerate() {
        assert_eq!(
            button.geometry(),
            Some(RectI::new(4, 30 * i as i32 + 4, 292, 22)),
            "button {i}"
        );
    }
}

#[test]
fn test_items_keep_append_order() {
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 3);
    let row = hbox(&frame).unwrap();

    &row << buttons[2].layout() << LayoutItem::spacer() << buttons[0].layout();
    row.append(buttons[1].layout());

    let children: Vec<SizerChild> = row.items().iter().map(|item| item.child).collect();
    assert_eq!(
        children,
        vec![
            SizerChild::Window(buttons[2].id()),
            SizerChild::Spacer(SizeI::ZERO),
            SizerChild::Window(buttons[0].id()),
            SizerChild::Window(buttons[1].id()),
        ]
    );
    assert_eq!(row.len(), 4);
    assert_eq!(row.orientation(), Orientation::Horizontal);
}

#[test]
fn test_tab_order_follows_append_order() {
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 4);
    let ids: Vec<_> = buttons.iter().map(Widget::id).collect();

    let row = BoxLayout::hbox_on(&frame).unwrap();
    &row << buttons[2].layout() << buttons[0].layout();

    assert_eq!(frame.children(), vec![ids[1], ids[3], ids[2], ids[0]]);
}

#[test]
fn test_nested_layout_moves_its_widgets() {
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 3);
    let ids: Vec<_> = buttons.iter().map(Widget::id).collect();

    let inner = BoxLayout::hbox(&toolkit);
    &inner << buttons[0].layout() << buttons[1].layout();
    assert!(!inner.is_attached());

    let outer = BoxLayout::vbox_on(&frame).unwrap();
    &outer << buttons[2].layout() << inner.layout();

    assert!(inner.is_attached());
    assert_eq!(frame.children(), vec![ids[2], ids[0], ids[1]]);
    assert_eq!(outer.items()[1].child, SizerChild::Sizer(inner.sizer_id()));
    assert_eq!(outer.items()[1].flags.border, Default::default());
}

#[test]
fn test_nested_layout_geometry() {
    let toolkit = Toolkit::default();
    let frame = Widget::top_level(&toolkit, SizeI::new(10, 10)).unwrap();
    let left = frame.child(SizeI::new(20, 10)).unwrap();
    let right = frame.child(SizeI::new(20, 10)).unwrap();
    let footer = frame.child(SizeI::new(40, 10)).unwrap();

    let row = BoxLayout::hbox(&toolkit);
    &row << left.layout().margin_px(0).stretch(1).justify()
        << right.layout().margin_px(0).stretch(1).justify();

    let column = vbox(&frame).unwrap();
    &column << row.layout().stretch(1).justify() << footer.layout().margin_px(0).right();
    frame.set_size(SizeI::new(100, 60)).unwrap();

    assert_eq!(left.geometry(), Some(RectI::new(0, 0, 50, 50)));
    assert_eq!(right.geometry(), Some(RectI::new(50, 0, 50, 50)));
    assert_eq!(footer.geometry(), Some(RectI::new(60, 50, 40, 10)));
}

#[test]
fn test_spacer_pushes_widgets_apart() {
    let toolkit = Toolkit::default();
    let frame = Widget::top_level(&toolkit, SizeI::new(10, 10)).unwrap();
    let ok = frame.child(SizeI::new(20, 10)).unwrap();
    let cancel = frame.child(SizeI::new(20, 10)).unwrap();

    let row = hbox(&frame).unwrap();
    &row << ok.layout().margin_px(0)
        << LayoutItem::spacer().margin_px(0).stretch(1)
        << cancel.layout().margin_px(0);
    frame.set_size(SizeI::new(100, 10)).unwrap();

    assert_eq!(ok.geometry(), Some(RectI::new(0, 0, 20, 10)));
    assert_eq!(cancel.geometry(), Some(RectI::new(80, 0, 20, 10)));
}

#[test]
fn test_append_after_owner_destroyed() {
    init_tracing();
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 1);
    let column = vbox(&frame).unwrap();
    let sizer = column.sizer_id();

    frame.destroy();
    assert!(!toolkit.contains_sizer(sizer));
    assert!(matches!(
        column.try_append(buttons[0].layout()),
        Err(LayoutError::MissingSizer(id)) if id == sizer
    ));
    assert!(column.is_empty());
}

#[test]
fn test_append_destroyed_widget() {
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 2);
    let column = vbox(&frame).unwrap();

    buttons[0].destroy();
    assert!(matches!(
        column.try_append(buttons[0].layout()),
        Err(LayoutError::Toolkit(TrellisError::InvalidWidget(_)))
    ));

    column.append(buttons[0].layout()).append(buttons[1].layout());
    assert_eq!(column.len(), 1);
}

#[test]
fn test_destroyed_widget_leaves_layout() {
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 2);
    let column = vbox(&frame).unwrap();
    &column << buttons[0].layout() << buttons[1].layout();

    buttons[0].destroy();
    assert_eq!(
        column.items().iter().map(|item| item.child).collect::<Vec<_>>(),
        vec![SizerChild::Window(buttons[1].id())]
    );
}

#[test]
fn test_attach_replaces_previous_layout() {
    let toolkit = Toolkit::default();
    let frame = Widget::top_level(&toolkit, SizeI::new(50, 50)).unwrap();
    let first = BoxLayout::vbox_on(&frame).unwrap();
    let first_sizer = first.sizer_id();

    let second = BoxLayout::hbox(&toolkit);
    second.attach(&frame).unwrap();

    assert!(!toolkit.contains_sizer(first_sizer));
    assert_eq!(toolkit.layout_of(frame.id()).unwrap(), Some(second.sizer_id()));
    assert!(matches!(first.try_append(LayoutItem::spacer()), Err(LayoutError::MissingSizer(_))));
}

#[test]
fn test_nesting_an_installed_layout_fails() {
    let toolkit = Toolkit::default();
    let frame = Widget::top_level(&toolkit, SizeI::new(50, 50)).unwrap();
    let installed = BoxLayout::vbox_on(&frame).unwrap();
    let other = BoxLayout::hbox(&toolkit);

    assert!(matches!(
        other.try_append(installed.layout()),
        Err(LayoutError::Toolkit(TrellisError::SizerAlreadyOwned(_)))
    ));
    assert!(matches!(
        other.try_append(other.layout()),
        Err(LayoutError::Toolkit(TrellisError::SizerCycle(_)))
    ));
}

#[test]
fn test_rejected_nesting_keeps_tab_order() {
    let toolkit = Toolkit::default();
    let (frame, buttons) = frame_with_buttons(&toolkit, 3);
    let ids: Vec<_> = buttons.iter().map(Widget::id).collect();

    let installed = BoxLayout::hbox_on(&frame).unwrap();
    &installed << buttons[0].layout() << buttons[1].layout();
    let other = BoxLayout::vbox(&toolkit);
    &other << buttons[2].layout();
    let before = frame.children();
    assert_eq!(before, vec![ids[0], ids[1], ids[2]]);

    assert!(matches!(
        other.try_append(installed.layout()),
        Err(LayoutError::Toolkit(TrellisError::SizerAlreadyOwned(_)))
    ));
    assert_eq!(frame.children(), before);
    assert_eq!(other.len(), 1);
}
