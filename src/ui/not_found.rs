use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

use crate::route::Route;
use crate::Message;

/// 404 page for paths no route matches
pub fn view(path: &str) -> Element<'_, Message> {
    let content = column![
        text("404").size(96),
        text("Page Not Found").size(30),
        text("Sorry, the page you're looking for doesn't exist or has been moved.").size(14),
        text(path).size(12),
        button("Back to Home")
            .on_press(Message::Navigate(Route::Gallery))
            .padding(12),
    ]
    .spacing(16)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
