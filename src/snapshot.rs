//! The data collected from one channel in one run.

use std::fmt;

use crate::error::ExtractError;

/// A profile field scraped from the channel pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Username,
    SubscriberCount,
    ViewCount,
    VideoCount,
    Description,
    ExternalLinks,
    JoinDate,
    Location,
}

impl Field {
    /// Every field, in report order.
    pub const ALL: [Field; 8] = [
        Field::Username,
        Field::SubscriberCount,
        Field::ViewCount,
        Field::VideoCount,
        Field::JoinDate,
        Field::Location,
        Field::Description,
        Field::ExternalLinks,
    ];

    /// The snake_case key of the field.
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::SubscriberCount => "subscriber_count",
            Field::ViewCount => "view_count",
            Field::VideoCount => "video_count",
            Field::Description => "description",
            Field::ExternalLinks => "external_links",
            Field::JoinDate => "join_date",
            Field::Location => "location",
        }
    }

    /// The label printed in front of the value in the console report.
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::SubscriberCount => "Subscriber Count",
            Field::ViewCount => "View Count",
            Field::VideoCount => "Video Count",
            Field::Description => "Description",
            Field::ExternalLinks => "External Links",
            Field::JoinDate => "Join Date",
            Field::Location => "Location",
        }
    }

    /// Critical fields abort the whole run when they cannot be extracted.
    /// The others are recorded as failures and the run carries on.
    pub fn is_critical(self) -> bool {
        matches!(
            self,
            Field::Username | Field::SubscriberCount | Field::ViewCount | Field::VideoCount
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An anchor found in the channel's link list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLink {
    /// Visible text of the anchor.
    pub text: String,
    /// Resolved `href` of the anchor, empty when the anchor has none.
    pub url: String,
}

/// Fields read from the channel's main page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainPage {
    pub subscriber_count: String,
    pub username: String,
}

/// Best-effort fields from the about page. Each one fails on its own.
#[derive(Debug)]
pub struct ChannelDetails {
    pub description: Result<String, ExtractError>,
    pub external_links: Result<Vec<ExternalLink>, ExtractError>,
    pub join_date: Result<String, ExtractError>,
    pub location: Result<String, ExtractError>,
}

/// Fields read from the channel's about page.
#[derive(Debug)]
pub struct AboutPage {
    pub view_count: String,
    pub video_count: String,
    pub details: ChannelDetails,
}

/// Everything collected for one channel.
///
/// The critical fields are plain strings: a snapshot only exists when all of
/// them were extracted. Best-effort fields keep their error so the report can
/// show what went wrong.
#[derive(Debug)]
pub struct ChannelSnapshot {
    pub username: String,
    pub subscriber_count: String,
    pub view_count: String,
    pub video_count: String,
    pub description: Result<String, ExtractError>,
    pub external_links: Result<Vec<ExternalLink>, ExtractError>,
    pub join_date: Result<String, ExtractError>,
    pub location: Result<String, ExtractError>,
}

impl ChannelSnapshot {
    pub fn new(main: MainPage, about: AboutPage) -> Self {
        let AboutPage {
            view_count,
            video_count,
            details,
        } = about;

        Self {
            username: main.username,
            subscriber_count: main.subscriber_count,
            view_count,
            video_count,
            description: details.description,
            external_links: details.external_links,
            join_date: details.join_date,
            location: details.location,
        }
    }

    /// Fields that could not be extracted.
    pub fn failed_fields(&self) -> Vec<Field> {
        let mut failed = Vec::new();
        if self.description.is_err() {
            failed.push(Field::Description);
        }
        if self.external_links.is_err() {
            failed.push(Field::ExternalLinks);
        }
        if self.join_date.is_err() {
            failed.push(Field::JoinDate);
        }
        if self.location.is_err() {
            failed.push(Field::Location);
        }
        failed
    }
}
