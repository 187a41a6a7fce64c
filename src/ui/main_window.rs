use fltk::{
    enums::FrameType,
    frame::Frame,
    group::{Flex, FlexType},
    menu::Choice,
    misc::HelpView,
    prelude::*,
    window::Window,
};

/// The main window and the four anchors the reactive cells bind to:
/// a message line, the region popup, the plot area and the content view.
pub struct MainWindow {
    pub window: Window,
    pub message: Frame,
    pub region_label: Frame,
    pub region: Choice,
    pub plot: Frame,
    pub content: HelpView,
}

pub fn build(title: &'static str) -> MainWindow {
    let mut window = Window::new(100, 100, 900, 700, title);

    let mut flex = Flex::new(0, 0, 900, 700, None);
    flex.set_type(FlexType::Column);

    let message = Frame::new(0, 0, 0, 24, "");
    flex.fixed(&message, 24);

    let mut row = Flex::new(0, 0, 0, 28, None);
    row.set_type(FlexType::Row);
    let region_label = Frame::new(0, 0, 0, 0, " Region: ");
    row.fixed(&region_label, 80);
    let region = Choice::new(0, 0, 0, 0, "");
    row.end();
    flex.fixed(&row, 28);

    let mut plot = Frame::new(0, 0, 0, 0, "");
    plot.set_frame(FrameType::FlatBox);

    let content = HelpView::new(0, 0, 0, 0, "");

    flex.end();
    window.resizable(&flex);
    window.end();

    MainWindow {
        window,
        message,
        region_label,
        region,
        plot,
        content,
    }
}
