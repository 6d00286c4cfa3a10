use crate::utils::error::{CinemaError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Cgv,
    LotteCinema,
    Megabox,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Cgv, Platform::LotteCinema, Platform::Megabox];

    pub fn id(&self) -> &'static str {
        match self {
            Platform::Cgv => "CGV",
            Platform::LotteCinema => "롯데시네마",
            Platform::Megabox => "메가박스",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = CinemaError;

    fn from_str(s: &str) -> Result<Self> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.id() == s)
            .ok_or_else(|| CinemaError::UnsupportedPlatform {
                platform: s.to_string(),
            })
    }
}

/// How rendered messages are marked up when sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStyle {
    #[default]
    Text,
    Html,
}

/// Notification body built from seven fields, rendered per platform.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFormat {
    pub platform: Platform,
    pub title: String,
    pub date_range: String,
    pub price: String,
    pub exist_1p1: String,
    pub exist_ticket: String,
    pub buy_url: String,
}

impl MessageFormat {
    pub fn new(
        platform: Platform,
        title: impl Into<String>,
        date_range: impl Into<String>,
        price: impl ToString,
        exist_1p1: impl ToString,
        exist_ticket: impl ToString,
        buy_url: impl Into<String>,
    ) -> Self {
        Self {
            platform,
            title: title.into(),
            date_range: date_range.into(),
            price: price.to_string(),
            exist_1p1: exist_1p1.to_string(),
            exist_ticket: exist_ticket.to_string(),
            buy_url: buy_url.into(),
        }
    }

    pub fn render(&self, style: MessageStyle) -> String {
        match style {
            MessageStyle::Text => self.convert_text(),
            MessageStyle::Html => self.convert_html(),
        }
    }

    pub fn convert_text(&self) -> String {
        let Self {
            platform,
            title,
            date_range,
            price,
            exist_1p1,
            exist_ticket,
            buy_url,
        } = self;

        match platform {
            Platform::Cgv => format!(
                "{platform}\n{title}\n오후 2시 판매시작!(or 4시)\n{date_range}{price}\n1+1영화:{exist_1p1}종{exist_ticket}\n구매링크:{buy_url}"
            ),
            Platform::LotteCinema => format!(
                "{platform}\n{title}\n{date_range}\n{price}원\n1+1영화:{exist_1p1}종, 티켓:{exist_ticket}종\n구매링크:{buy_url}"
            ),
            Platform::Megabox => format!(
                "{platform}\n{title}\n{date_range}\n{price}원(개별사용 불가)\n1+1영화:{exist_1p1}종, 티켓:{exist_ticket}종\n구매링크:{buy_url}\n"
            ),
        }
    }

    pub fn convert_html(&self) -> String {
        let platform = self.platform;
        let title = escape_html(&self.title);
        let date_range = escape_html(&self.date_range);
        let price = escape_html(&self.price);
        let exist_1p1 = escape_html(&self.exist_1p1);
        let exist_ticket = escape_html(&self.exist_ticket);
        let buy_url = escape_html(&self.buy_url);

        match platform {
            Platform::Cgv => format!(
                "{platform}\n<b>{title}</b>\n오후 2시 판매시작!(or 4시)\n{date_range}{price}\n1+1영화: {exist_1p1}종{exist_ticket}\n<a href=\"{buy_url}\">{buy_url}</a>"
            ),
            Platform::LotteCinema => format!(
                "{platform}\n<b>{title}</b>\n{date_range}\n{price}원\n1+1영화: {exist_1p1}종, 티켓: {exist_ticket}종\n<a href=\"{buy_url}\">{buy_url}</a>"
            ),
            Platform::Megabox => format!(
                "{platform}\n<b>{title}</b>\n{date_range}\n{price}원(개별사용 불가)\n1+1영화: {exist_1p1}종, 티켓: {exist_ticket}종\n<a href=\"{buy_url}\">{buy_url}</a>"
            ),
        }
    }
}

/// Escapes the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
