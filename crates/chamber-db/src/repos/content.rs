//! Events and blog posts for the public site.

use chrono::{DateTime, SecondsFormat, Utc};

use chamber_core::entities::{BlogPost, Event};
use chamber_core::forms::{NewBlogPost, NewEvent};
use chamber_core::ids::{PREFIX_EVENT, PREFIX_POST};

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime};
use crate::service::ChamberService;

const EVENT_COLUMNS: &str = "id, title, slug, description, location, starts_at, created_at";
/// Fixed-width UTC text, so string order in SQL matches time order.
fn sortable(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

const POST_COLUMNS: &str = "id, author_id, title, slug, body, published_at, created_at";

fn row_to_event(row: &libsql::Row) -> Result<Event, DatabaseError> {
    Ok(Event {
        id: row.get::<String>(0)?,
        title: row.get::<String>(1)?,
        slug: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        location: get_opt_string(row, 4)?,
        starts_at: parse_datetime(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn row_to_post(row: &libsql::Row) -> Result<BlogPost, DatabaseError> {
    Ok(BlogPost {
        id: row.get::<String>(0)?,
        author_id: row.get::<String>(1)?,
        title: row.get::<String>(2)?,
        slug: row.get::<String>(3)?,
        body: row.get::<String>(4)?,
        published_at: parse_optional_datetime(get_opt_string(row, 5)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn unique_or<'a>(entity: &'static str, slug: &'a str) -> impl FnOnce(libsql::Error) -> DatabaseError + 'a {
    move |e| {
        if is_unique_violation(&e) {
            DatabaseError::conflict(entity, slug)
        } else {
            e.into()
        }
    }
}

impl ChamberService {
    pub async fn create_event(&self, new: &NewEvent) -> Result<Event, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_EVENT).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO events ({EVENT_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                libsql::params![
                    id.as_str(),
                    new.title.as_str(),
                    new.slug.as_str(),
                    new.description.as_deref(),
                    new.location.as_deref(),
                    sortable(new.starts_at),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(unique_or("event", &new.slug))?;
        Ok(Event {
            id,
            title: new.title.clone(),
            slug: new.slug.clone(),
            description: new.description.clone(),
            location: new.location.clone(),
            starts_at: new.starts_at,
            created_at: now,
        })
    }

    /// Events starting at or after `from`, soonest first.
    pub async fn list_upcoming_events(
        &self,
        from: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Event>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {EVENT_COLUMNS} FROM events WHERE starts_at >= ?1 ORDER BY starts_at LIMIT ?2"
                ),
                libsql::params![sortable(from), i64::from(limit)],
            )
            .await?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().await? {
            events.push(row_to_event(&row)?);
        }
        Ok(events)
    }

    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Event, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE slug = ?1"), [slug])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("event", slug))?;
        row_to_event(&row)
    }

    /// Save a post, publishing it now when `new.publish` is set.
    pub async fn create_blog_post(&self, author_id: &str, new: &NewBlogPost) -> Result<BlogPost, DatabaseError> {
        self.get_user(author_id).await?;
        let now = Utc::now();
        let published_at = new.publish.then_some(now);
        let id = self.db().generate_id(PREFIX_POST).await?;
        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO blog_posts ({POST_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
                libsql::params![
                    id.as_str(),
                    author_id,
                    new.title.as_str(),
                    new.slug.as_str(),
                    new.body.as_str(),
                    published_at.map(|t| t.to_rfc3339()),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(unique_or("post", &new.slug))?;
        Ok(BlogPost {
            id,
            author_id: author_id.to_string(),
            title: new.title.clone(),
            slug: new.slug.clone(),
            body: new.body.clone(),
            published_at,
            created_at: now,
        })
    }

    /// Publish a draft. Already-published posts keep their original date.
    pub async fn publish_blog_post(&self, slug: &str) -> Result<BlogPost, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE blog_posts SET published_at = COALESCE(published_at, ?1) WHERE slug = ?2",
                libsql::params![Utc::now().to_rfc3339(), slug],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("post", slug));
        }
        self.get_blog_post_by_slug(slug).await
    }

    /// Published posts, newest first.
    pub async fn list_published_posts(&self, limit: u32) -> Result<Vec<BlogPost>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {POST_COLUMNS} FROM blog_posts WHERE published_at IS NOT NULL
                     ORDER BY published_at DESC LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut posts = Vec::new();
        while let Some(row) = rows.next().await? {
            posts.push(row_to_post(&row)?);
        }
        Ok(posts)
    }

    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {POST_COLUMNS} FROM blog_posts WHERE slug = ?1"), [slug])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("post", slug))?;
        row_to_post(&row)
    }
}

#[cfg(test)]
mod tests {
    use chamber_core::enums::UserRole;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{seed_user, test_service};

    fn event(title: &str, starts_at: DateTime<Utc>) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            slug: chamber_core::slugify(title),
            starts_at,
            location: Some("Town Hall".into()),
            description: None,
        }
    }

    fn post(title: &str, publish: bool) -> NewBlogPost {
        NewBlogPost {
            title: title.to_string(),
            slug: chamber_core::slugify(title),
            body: "Body text".into(),
            publish,
        }
    }

    #[tokio::test]
    async fn upcoming_events_skip_past_and_sort() {
        let svc = test_service().await;
        let now = Utc::now();
        svc.create_event(&event("Past Mixer", now - Duration::days(3))).await.unwrap();
        svc.create_event(&event("Late Gala", now + Duration::days(30))).await.unwrap();
        svc.create_event(&event("Early Breakfast", now + Duration::days(2))).await.unwrap();

        let upcoming = svc.list_upcoming_events(now, 10).await.unwrap();
        let titles: Vec<&str> = upcoming.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Early Breakfast", "Late Gala"]);
        assert_eq!(svc.list_upcoming_events(now, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_event_slug_is_conflict() {
        let svc = test_service().await;
        let when = Utc::now();
        svc.create_event(&event("Gala", when)).await.unwrap();
        let err = svc.create_event(&event("Gala", when)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict { entity: "event", .. }));
        assert_eq!(svc.get_event_by_slug("gala").await.unwrap().title, "Gala");
    }

    #[tokio::test]
    async fn drafts_are_hidden_until_published() {
        let svc = test_service().await;
        let author = seed_user(&svc, "Editor", UserRole::Admin).await;
        svc.create_blog_post(&author.id, &post("Welcome", true)).await.unwrap();
        let draft = svc.create_blog_post(&author.id, &post("Coming Soon", false)).await.unwrap();
        assert!(draft.published_at.is_none());

        assert_eq!(svc.list_published_posts(10).await.unwrap().len(), 1);

        let published = svc.publish_blog_post("coming_soon").await.unwrap();
        assert!(published.published_at.is_some());
        assert_eq!(svc.list_published_posts(10).await.unwrap().len(), 2);

        let again = svc.publish_blog_post("coming_soon").await.unwrap();
        assert_eq!(again.published_at, published.published_at);
    }

    #[tokio::test]
    async fn duplicate_post_slug_is_conflict_naming_the_slug() {
        let svc = test_service().await;
        let author = seed_user(&svc, "Editor", UserRole::Admin).await;
        svc.create_blog_post(&author.id, &post("Welcome", false)).await.unwrap();
        let err = svc.create_blog_post(&author.id, &post("Welcome", true)).await.unwrap_err();
        match err {
            DatabaseError::Conflict { entity, key } => {
                assert_eq!(entity, "post");
                assert_eq!(key, "welcome");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }
}
