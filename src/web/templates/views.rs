//! Display-ready shapes of CMS records. Every media URL goes through the
//! endpoint resolver here so templates never see an internal CMS host.

use chrono::{DateTime, Utc};
use url::Url;

use crate::{
    cms::EndpointResolver,
    domain::{Announcement, Article, ArticleKind, Media, Pagination, PressCoverage, Product, Statistic},
};

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[derive(Debug, Clone)]
pub struct ImageView {
    pub url: String,
    pub alt: String,
}

impl ImageView {
    pub fn from_media(media: &Media, resolver: &dyn EndpointResolver) -> Self {
        Self {
            url: resolver.media_url(&media.url),
            alt: media.alt().to_string(),
        }
    }

    fn maybe(media: Option<&Media>, resolver: &dyn EndpointResolver) -> Option<Self> {
        media
            .filter(|m| !m.url.is_empty())
            .map(|m| Self::from_media(m, resolver))
    }
}

#[derive(Debug, Clone)]
pub struct AnnouncementCard {
    pub id: u64,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub type_label: &'static str,
    pub priority: &'static str,
    pub period: String,
    pub image: Option<ImageView>,
    pub link: Option<String>,
    pub link_text: String,
}

impl AnnouncementCard {
    pub fn new(announcement: &Announcement, resolver: &dyn EndpointResolver) -> Self {
        let period = match announcement.end_date {
            Some(end) => format!(
                "{} - {}",
                format_date(announcement.start_date),
                format_date(end)
            ),
            None => format!("Since {}", format_date(announcement.start_date)),
        };

        Self {
            id: announcement.id,
            title: announcement.title.clone(),
            slug: announcement.slug.clone(),
            excerpt: announcement.excerpt.clone().unwrap_or_default(),
            content: announcement.content.clone(),
            type_label: announcement.announcement_type.as_str(),
            priority: announcement.priority.as_str(),
            period,
            image: ImageView::maybe(announcement.image.as_ref(), resolver),
            link: announcement.link.clone(),
            link_text: announcement
                .link_text
                .clone()
                .unwrap_or_else(|| "Learn more".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BannerView {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub priority: &'static str,
    pub href: String,
    pub link_text: String,
    pub rotating: bool,
}

impl BannerView {
    pub fn new(announcement: &Announcement, rotating: bool) -> Self {
        Self {
            id: announcement.dismissal_key(),
            title: announcement.title.clone(),
            excerpt: announcement.excerpt.clone().unwrap_or_default(),
            priority: announcement.priority.as_str(),
            href: announcement
                .link
                .clone()
                .unwrap_or_else(|| format!("/announcements/{}", announcement.slug)),
            link_text: announcement
                .link_text
                .clone()
                .unwrap_or_else(|| "Read more".to_string()),
            rotating,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArticleCard {
    pub title: String,
    pub href: String,
    pub excerpt: String,
    pub category: &'static str,
    pub kind: &'static str,
    pub date: String,
    pub cover: Option<ImageView>,
}

impl ArticleCard {
    pub fn new(article: &Article, resolver: &dyn EndpointResolver) -> Self {
        Self {
            title: article.title.clone(),
            href: format!("/articles/{}", article.slug),
            excerpt: article.excerpt.clone().unwrap_or_default(),
            category: article.category.as_str(),
            kind: article.kind.as_str(),
            date: article.published_at.map(format_date).unwrap_or_default(),
            cover: ImageView::maybe(article.cover.as_ref(), resolver),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArticleView {
    pub card: ArticleCard,
    pub content: String,
    pub video_embed: Option<String>,
    pub gallery: Vec<ImageView>,
}

impl ArticleView {
    pub fn new(article: &Article, resolver: &dyn EndpointResolver) -> Self {
        let video_embed = match article.kind {
            ArticleKind::Video => article.video_url.as_deref().map(embed_url),
            _ => None,
        };

        Self {
            card: ArticleCard::new(article, resolver),
            content: article.content.clone(),
            video_embed,
            gallery: article
                .gallery
                .iter()
                .map(|m| ImageView::from_media(m, resolver))
                .collect(),
        }
    }
}

/// YouTube watch/short links become embeddable player URLs; anything else is
/// assumed to be embeddable already.
pub fn embed_url(raw: &str) -> String {
    match youtube_id(raw) {
        Some(id) => format!("https://www.youtube.com/embed/{}", id),
        None => raw.to_string(),
    }
}

fn youtube_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = match host {
        "youtu.be" => segments.next().map(str::to_string),
        "youtube.com" | "m.youtube.com" | "youtube-nocookie.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            "shorts" | "embed" | "live" => segments.next().map(str::to_string),
            _ => None,
        },
        _ => None,
    }?;

    (!id.is_empty()).then_some(id)
}

#[derive(Debug, Clone)]
pub struct ProductCard {
    pub name: String,
    pub href: String,
    pub description: String,
    pub price: Option<String>,
    pub category: String,
    pub image: Option<ImageView>,
    pub in_stock: bool,
}

impl ProductCard {
    pub fn new(product: &Product, resolver: &dyn EndpointResolver) -> Self {
        Self {
            name: product.name.clone(),
            href: format!("/products/{}", product.slug),
            description: product.description.clone(),
            price: product.display_price(),
            category: product.category.clone().unwrap_or_default(),
            image: ImageView::maybe(product.image.as_ref(), resolver),
            in_stock: product.in_stock,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PressView {
    pub title: String,
    pub outlet: String,
    pub url: String,
    pub date: String,
    pub summary: String,
    pub logo: Option<ImageView>,
}

impl PressView {
    pub fn new(item: &PressCoverage, resolver: &dyn EndpointResolver) -> Self {
        Self {
            title: item.title.clone(),
            outlet: item.outlet.clone(),
            url: item.url.clone(),
            date: item
                .published_on
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            summary: item.summary.clone().unwrap_or_default(),
            logo: ImageView::maybe(item.logo.as_ref(), resolver),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatView {
    pub label: String,
    pub value: String,
}

impl From<&Statistic> for StatView {
    fn from(stat: &Statistic) -> Self {
        Self {
            label: stat.label.clone(),
            value: stat.display_value(),
        }
    }
}

/// One entry of a filter bar ("All", "Events", ...).
#[derive(Debug, Clone)]
pub struct FilterLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

impl FilterLink {
    /// An "all" entry followed by one link per option on `path?param=option`.
    pub fn build(path: &str, param: &str, options: &[&str], selected: &str) -> Vec<Self> {
        let mut links = vec![FilterLink {
            label: "all".to_string(),
            href: path.to_string(),
            active: selected.is_empty(),
        }];
        links.extend(options.iter().map(|option| FilterLink {
            label: option.to_string(),
            href: format!("{}?{}={}", path, param, option),
            active: *option == selected,
        }));
        links
    }
}

/// Previous/next links for a paginated listing.
#[derive(Debug, Clone)]
pub struct PagerView {
    pub page: u32,
    pub page_count: u32,
    pub prev: Option<String>,
    pub next: Option<String>,
}

impl PagerView {
    /// `extra` is appended to every link, e.g. `&category=news`.
    pub fn new(pagination: &Pagination, path: &str, extra: &str) -> Self {
        let link = |page: u32| format!("{}?page={}{}", path, page, extra);
        Self {
            page: pagination.page,
            page_count: pagination.page_count,
            prev: (pagination.page > 1).then(|| link(pagination.page - 1)),
            next: (pagination.page < pagination.page_count).then(|| link(pagination.page + 1)),
        }
    }
}
