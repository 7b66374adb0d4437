use serde::{Deserialize, Serialize};

use crate::de::{parse_date, parse_time};
use crate::{ModelError, Searchable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BannerWire")]
pub struct Banner {
    pub id: i64,
    #[serde(rename = "banner_title")]
    pub title: String,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
}

/// Banner as served. Older endpoints use `title` and `banner_image` /
/// `image_url`, and some answers carry both spellings.
#[derive(Deserialize)]
struct BannerWire {
    id: i64,
    #[serde(default)]
    banner_title: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    start_time: Option<String>,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    banner_image: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default = "yes")]
    is_active: bool,
}

impl TryFrom<BannerWire> for Banner {
    type Error = String;

    fn try_from(w: BannerWire) -> Result<Self, Self::Error> {
        let title = w.banner_title.or(w.title).ok_or("missing field `banner_title`")?;
        Ok(Banner {
            id: w.id,
            title,
            description: w.description,
            start_date: w.start_date,
            end_date: w.end_date,
            start_time: w.start_time,
            end_time: w.end_time,
            image: w.image.or(w.banner_image).or(w.image_url),
            is_active: w.is_active,
        })
    }
}

fn yes() -> bool { true }

/// Banner create/update payload. The image travels as a separate multipart part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BannerForm {
    #[serde(rename = "banner_title", alias = "bannerTitle", alias = "title")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "startDate")]
    pub start_date: String,
    #[serde(alias = "endDate")]
    pub end_date: String,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
}

impl BannerForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() { return Err(ModelError::required("banner_title")); }
        let start = parse_date("start_date", &self.start_date)?
            .and_time(parse_time("start_time", &self.start_time)?);
        let end = parse_date("end_date", &self.end_date)?
            .and_time(parse_time("end_time", &self.end_time)?);
        if end <= start {
            return Err(ModelError::Validation("banner must end after it starts".into()));
        }
        Ok(())
    }
}

impl Searchable for Banner {
    fn search_fields(&self) -> Vec<String> {
        let mut v = vec![self.title.clone()];
        v.extend(self.description.clone());
        v.extend(self.start_date.clone());
        v
    }
}
