//! Widgets shared by every screen: header, error box, loading text

use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};

use crate::api::thumbnail::DecodedImage;
use crate::route::Route;
use crate::Message;

/// Load state of a remote image shown in the UI
#[derive(Debug, Clone)]
pub enum ImageState {
    Loading,
    Loaded(Handle),
    Failed,
}

impl From<DecodedImage> for Handle {
    fn from(img: DecodedImage) -> Self {
        Handle::from_rgba(img.width, img.height, img.pixels)
    }
}

/// App header with a way back to the gallery from other screens
pub fn header(route: &Route) -> Element<'_, Message> {
    let title = column![
        text("Photo Gallery").size(22),
        text("Powered by Lorem Picsum").size(12),
    ]
    .spacing(2);

    let mut bar = row![title, horizontal_space()]
        .align_y(Alignment::Center)
        .padding(16);

    if !route.is_gallery() {
        bar = bar.push(
            button("← Back to Gallery")
                .on_press(Message::Navigate(Route::Gallery))
                .style(button::text),
        );
    }

    container(bar).width(Length::Fill).into()
}

/// Error box with an optional retry button
pub fn error_message<'a>(
    title: &'a str,
    message: String,
    on_retry: Option<Message>,
) -> Element<'a, Message> {
    let mut content = column![
        text("⚠").size(40),
        text(title).size(20),
        text(message).size(14),
    ]
    .spacing(12)
    .padding(32)
    .align_x(Alignment::Center);

    if let Some(msg) = on_retry {
        content = content.push(button("Try Again").on_press(msg).padding(10));
    }

    container(content)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

/// Centered status line shown while something loads
pub fn loading<'a>(label: &'a str) -> Element<'a, Message> {
    container(text(label).size(14))
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(24)
        .into()
}

/// Fixed-size box standing in for an image that isn't there
pub fn placeholder<'a>(label: &'a str, width: f32, height: f32) -> Element<'a, Message> {
    container(text(label).size(12))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .center_x(Length::Fixed(width))
        .center_y(Length::Fixed(height))
        .style(container::rounded_box)
        .into()
}
