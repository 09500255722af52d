use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use domain_users::UserRepository;
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{
    BookingSummary, Comment, CommentView, CreateComment, CreateItem, Item, ItemView, UpdateItem,
    last_booking, next_booking,
};
use crate::repository::{BookingDirectory, ItemRepository};

/// Service layer for Item business logic
#[derive(Clone)]
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingDirectory>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(
        repository: R,
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingDirectory>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            bookings,
        }
    }

    /// List a new item for the calling owner
    pub async fn create_item(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let owner_exists = self
            .users
            .exists(owner_id)
            .await
            .map_err(|e| ItemError::Internal(e.to_string()))?;
        if !owner_exists {
            return Err(ItemError::UserNotFound(owner_id));
        }

        self.repository.create(owner_id, input).await
    }

    /// Partially update an item; only the owner may do this
    pub async fn update_item(
        &self,
        caller: i64,
        item_id: i64,
        input: UpdateItem,
    ) -> ItemResult<Item> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        let item = self
            .repository
            .find_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        if item.owner_id != caller {
            return Err(ItemError::NotOwner(item_id));
        }

        self.repository.update(item_id, input).await
    }

    /// Fetch one item. Comments are visible to everyone; last/next booking
    /// only to the owner.
    pub async fn get_item(&self, caller: i64, item_id: i64) -> ItemResult<ItemView> {
        let item = self
            .repository
            .find_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        let include_bookings = item.owner_id == caller;
        let mut views = self.build_views(vec![item], include_bookings).await?;
        Ok(views.remove(0))
    }

    /// All items of the calling owner, enriched, ordered by id
    pub async fn list_items(&self, owner_id: i64) -> ItemResult<Vec<ItemView>> {
        let items = self.repository.find_by_owner(owner_id).await?;
        self.build_views(items, true).await
    }

    /// Available-item substring search; blank text short-circuits to empty
    pub async fn search_items(&self, text: &str) -> ItemResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.repository.search(text).await
    }

    /// Add a comment; the caller must have a completed booking of the item
    pub async fn add_comment(
        &self,
        caller: i64,
        item_id: i64,
        input: CreateComment,
    ) -> ItemResult<CommentView> {
        input
            .validate()
            .map_err(|e| ItemError::Validation(e.to_string()))?;

        self.repository
            .find_by_id(item_id)
            .await?
            .ok_or(ItemError::NotFound(item_id))?;

        let author = self
            .users
            .find_by_id(caller)
            .await
            .map_err(|e| ItemError::Internal(e.to_string()))?
            .ok_or(ItemError::UserNotFound(caller))?;

        let completed = self
            .bookings
            .completed_for_user(caller, item_id, Utc::now())
            .await?;
        if !completed {
            return Err(ItemError::Validation(format!(
                "User {} has not completed a booking of item {}",
                caller, item_id
            )));
        }

        let comment = self.repository.add_comment(item_id, caller, input).await?;

        Ok(CommentView {
            id: comment.id,
            text: comment.text,
            author_name: author.name,
            created: comment.created,
        })
    }

    /// Enrich items with comments and (optionally) booking summaries using
    /// one comments query, one users query and one bookings query.
    async fn build_views(
        &self,
        items: Vec<Item>,
        include_bookings: bool,
    ) -> ItemResult<Vec<ItemView>> {
        let item_ids: Vec<i64> = items.iter().map(|i| i.id).collect();

        let comments = self.repository.comments_for_items(item_ids.clone()).await?;

        let mut author_ids: Vec<i64> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let author_names: HashMap<i64, String> = self
            .users
            .find_by_ids(author_ids)
            .await
            .map_err(|e| ItemError::Internal(e.to_string()))?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let mut comments_by_item: HashMap<i64, Vec<CommentView>> = HashMap::new();
        for comment in comments {
            let view = comment_view(&comment, &author_names);
            comments_by_item.entry(comment.item_id).or_default().push(view);
        }

        let mut bookings_by_item: HashMap<i64, Vec<BookingSummary>> = HashMap::new();
        if include_bookings && !item_ids.is_empty() {
            for summary in self.bookings.approved_for_items(item_ids).await? {
                bookings_by_item.entry(summary.item_id).or_default().push(summary);
            }
        }

        let now = Utc::now();
        let views = items
            .into_iter()
            .map(|item| {
                let item_bookings = bookings_by_item.remove(&item.id).unwrap_or_default();
                ItemView {
                    id: item.id,
                    name: item.name,
                    description: item.description,
                    available: item.available,
                    request_id: item.request_id,
                    last_booking: last_booking(&item_bookings, now),
                    next_booking: next_booking(&item_bookings, now),
                    comments: comments_by_item.remove(&item.id).unwrap_or_default(),
                }
            })
            .collect();

        Ok(views)
    }
}

fn comment_view(comment: &Comment, author_names: &HashMap<i64, String>) -> CommentView {
    CommentView {
        id: comment.id,
        text: comment.text.clone(),
        author_name: author_names.get(&comment.author_id).cloned().unwrap_or_default(),
        created: comment.created,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use domain_users::{CreateUser, UpdateUser, User, UserResult};
    use mockall::predicate::eq;

    mockall::mock! {
        Users {}

        #[async_trait]
        impl UserRepository for Users {
            async fn create(&self, input: CreateUser) -> UserResult<User>;
            async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;
            async fn find_by_ids(&self, ids: Vec<i64>) -> UserResult<Vec<User>>;
            async fn find_all(&self) -> UserResult<Vec<User>>;
            async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User>;
            async fn delete(&self, id: i64) -> UserResult<bool>;
            async fn exists(&self, id: i64) -> UserResult<bool>;
        }
    }

    mockall::mock! {
        Directory {}

        #[async_trait]
        impl BookingDirectory for Directory {
            async fn approved_for_items(
                &self,
                item_ids: Vec<i64>,
            ) -> ItemResult<Vec<BookingSummary>>;
            async fn completed_for_user(
                &self,
                booker_id: i64,
                item_id: i64,
                now: DateTime<Utc>,
            ) -> ItemResult<bool>;
        }
    }

    fn sample_item(id: i64, owner_id: i64) -> Item {
        Item {
            id,
            name: "Drill".to_string(),
            description: "Cordless drill".to_string(),
            available: true,
            owner_id,
            request_id: None,
        }
    }

    fn service(
        repo: MockItemRepository,
        users: MockUsers,
        directory: MockDirectory,
    ) -> ItemService<MockItemRepository> {
        ItemService::new(repo, Arc::new(users), Arc::new(directory))
    }

    #[tokio::test]
    async fn create_item_requires_existing_owner() {
        let repo = MockItemRepository::new();
        let mut users = MockUsers::new();
        users.expect_exists().with(eq(5)).returning(|_| Ok(false));

        let svc = service(repo, users, MockDirectory::new());
        let result = svc
            .create_item(
                5,
                CreateItem {
                    name: "Drill".to_string(),
                    description: "Cordless drill".to_string(),
                    available: true,
                    request_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ItemError::UserNotFound(5))));
    }

    #[tokio::test]
    async fn update_item_by_non_owner_is_hidden() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(sample_item(10, 1))));
        repo.expect_update().never();

        let svc = service(repo, MockUsers::new(), MockDirectory::new());
        let result = svc
            .update_item(2, 10, UpdateItem::default())
            .await;

        assert!(matches!(result, Err(ItemError::NotOwner(10))));
    }

    #[tokio::test]
    async fn get_item_by_non_owner_skips_booking_lookup() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(sample_item(10, 1))));
        repo.expect_comments_for_items().returning(|_| Ok(Vec::new()));

        let mut users = MockUsers::new();
        users.expect_find_by_ids().returning(|_| Ok(Vec::new()));

        let mut directory = MockDirectory::new();
        directory.expect_approved_for_items().never();

        let svc = service(repo, users, directory);
        let view = svc.get_item(2, 10).await.unwrap();

        assert_eq!(view.id, 10);
        assert!(view.last_booking.is_none());
        assert!(view.next_booking.is_none());
    }

    #[tokio::test]
    async fn get_item_by_owner_enriches_bookings() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(sample_item(10, 1))));
        repo.expect_comments_for_items().returning(|_| Ok(Vec::new()));

        let mut users = MockUsers::new();
        users.expect_find_by_ids().returning(|_| Ok(Vec::new()));

        let mut directory = MockDirectory::new();
        directory.expect_approved_for_items().returning(|_| {
            let now = Utc::now();
            Ok(vec![
                BookingSummary {
                    id: 1,
                    item_id: 10,
                    booker_id: 2,
                    start: now - Duration::days(2),
                    end: now - Duration::days(1),
                },
                BookingSummary {
                    id: 2,
                    item_id: 10,
                    booker_id: 3,
                    start: now + Duration::days(1),
                    end: now + Duration::days(2),
                },
            ])
        });

        let svc = service(repo, users, directory);
        let view = svc.get_item(1, 10).await.unwrap();

        assert_eq!(view.last_booking.unwrap().id, 1);
        assert_eq!(view.next_booking.unwrap().id, 2);
    }

    #[tokio::test]
    async fn search_with_blank_text_short_circuits() {
        let mut repo = MockItemRepository::new();
        repo.expect_search().never();

        let svc = service(repo, MockUsers::new(), MockDirectory::new());

        assert!(svc.search_items("").await.unwrap().is_empty());
        assert!(svc.search_items("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_comment_requires_completed_booking() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(sample_item(10, 1))));
        repo.expect_add_comment().never();

        let mut users = MockUsers::new();
        users.expect_find_by_id().with(eq(2)).returning(|id| {
            Ok(Some(User {
                id,
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
            }))
        });

        let mut directory = MockDirectory::new();
        directory
            .expect_completed_for_user()
            .returning(|_, _, _| Ok(false));

        let svc = service(repo, users, directory);
        let result = svc
            .add_comment(
                2,
                10,
                CreateComment {
                    text: "Great drill".to_string(),
                },
            )
            .await;

        match result {
            Err(ItemError::Validation(msg)) => {
                assert_eq!(msg, "User 2 has not completed a booking of item 10");
            }
            other => panic!("expected validation error, got {:?}", other.map(|v| v.id)),
        }
    }

    #[tokio::test]
    async fn add_comment_returns_view_with_author_name() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(sample_item(10, 1))));
        repo.expect_add_comment().returning(|item_id, author_id, input| {
            Ok(Comment {
                id: 77,
                text: input.text,
                item_id,
                author_id,
                created: Utc::now(),
            })
        });

        let mut users = MockUsers::new();
        users.expect_find_by_id().with(eq(2)).returning(|id| {
            Ok(Some(User {
                id,
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
            }))
        });

        let mut directory = MockDirectory::new();
        directory
            .expect_completed_for_user()
            .returning(|_, _, _| Ok(true));

        let svc = service(repo, users, directory);
        let view = svc
            .add_comment(
                2,
                10,
                CreateComment {
                    text: "Great drill".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(view.id, 77);
        assert_eq!(view.author_name, "Bob");
        assert_eq!(view.text, "Great drill");
    }
}
