//! Detail screen for a single photo

use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{Alignment, ContentFit, Element, Length};

use super::common::{self, ImageState};
use crate::route::Route;
use crate::state::data::Photo;
use crate::state::detail::PhotoDetailLoader;
use crate::Message;

/// Detail loader plus the preview image for the current photo
#[derive(Debug)]
pub struct DetailScreen {
    pub loader: PhotoDetailLoader,
    pub image: ImageState,
}

impl DetailScreen {
    pub fn new() -> Self {
        Self {
            loader: PhotoDetailLoader::new(),
            image: ImageState::Loading,
        }
    }

    pub fn teardown(&mut self) {
        self.loader.dispose();
    }
}

pub fn view(screen: &DetailScreen) -> Element<'_, Message> {
    let loader = &screen.loader;

    if loader.is_loading() {
        return common::loading("Loading photo details...");
    }

    let Some(photo) = loader.photo() else {
        let message = loader
            .error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "The requested photo could not be found.".to_string());

        let retry = loader.id().map(|_| Message::RetryDetail);
        return column![
            common::error_message("Photo Not Found", message, retry),
            container(
                button("Back to Gallery")
                    .on_press(Message::Navigate(Route::Gallery))
                    .style(button::text)
            )
            .center_x(Length::Fill),
        ]
        .into();
    };

    let preview: Element<'_, Message> = match &screen.image {
        ImageState::Loaded(handle) => image(handle.clone())
            .width(Length::Fill)
            .content_fit(ContentFit::Contain)
            .into(),
        ImageState::Failed => common::placeholder("Image unavailable", 480.0, 360.0),
        ImageState::Loading => common::placeholder("Loading image...", 480.0, 360.0),
    };

    let image_panel = column![
        preview,
        button("Open full-size image")
            .on_press(Message::OpenExternal(photo.download_url.clone()))
            .padding(10)
            .width(Length::Fill),
    ]
    .spacing(16)
    .width(Length::FillPortion(1));

    let body = row![image_panel, info_panel(photo)]
        .spacing(32)
        .padding(24);

    scrollable(body).height(Length::Fill).into()
}

fn info_panel(photo: &Photo) -> Element<'_, Message> {
    let photographer = row![
        container(text(photo.author_initial()).size(24))
            .width(Length::Fixed(56.0))
            .height(Length::Fixed(56.0))
            .center_x(Length::Fixed(56.0))
            .center_y(Length::Fixed(56.0))
            .style(container::rounded_box),
        column![text("Photographer").size(12), text(&photo.author).size(22)].spacing(2),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let details = column![
        text("Technical Details").size(18),
        detail_row("Photo ID", format!("#{}", photo.id)),
        detail_row("Dimensions", photo.dimensions_label()),
        detail_row("Aspect Ratio", photo.aspect_label()),
        detail_row("Source", "Lorem Picsum".to_string()),
    ]
    .spacing(8);

    column![
        text(photo.title()).size(34),
        container(photographer).padding(16).style(container::rounded_box),
        column![text("About this Photo").size(18), text(photo.description()).size(14)].spacing(8),
        details,
        button("View Source")
            .on_press(Message::OpenExternal(photo.url.clone()))
            .padding(10)
            .style(button::secondary),
    ]
    .spacing(24)
    .width(Length::FillPortion(1))
    .into()
}

fn detail_row<'a>(label: &'a str, value: String) -> Element<'a, Message> {
    row![
        text(label).size(13).width(Length::Fixed(120.0)),
        text(value).size(15),
    ]
    .spacing(8)
    .into()
}
