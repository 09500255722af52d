use std::collections::HashMap;
use std::sync::Arc;

use domain_items::{Item, ItemRepository};
use domain_users::UserRepository;
use validator::Validate;

use crate::error::{RequestError, RequestResult};
use crate::models::{CreateItemRequest, ItemRequest, ItemRequestView};
use crate::repository::RequestRepository;

/// Service layer for ItemRequest business logic
#[derive(Clone)]
pub struct RequestService<R: RequestRepository> {
    repository: Arc<R>,
    users: Arc<dyn UserRepository>,
    items: Arc<dyn ItemRepository>,
}

impl<R: RequestRepository> RequestService<R> {
    pub fn new(repository: R, users: Arc<dyn UserRepository>, items: Arc<dyn ItemRepository>) -> Self {
        Self {
            repository: Arc::new(repository),
            users,
            items,
        }
    }

    /// File a new request for an item nobody has listed yet
    pub async fn create_request(
        &self,
        caller: i64,
        input: CreateItemRequest,
    ) -> RequestResult<ItemRequest> {
        input
            .validate()
            .map_err(|e| RequestError::Validation(e.to_string()))?;

        self.ensure_user_exists(caller).await?;
        self.repository.create(caller, input).await
    }

    /// The caller's own requests, newest first, with answering items
    pub async fn own_requests(&self, caller: i64) -> RequestResult<Vec<ItemRequestView>> {
        self.ensure_user_exists(caller).await?;

        let requests = self.repository.find_by_requestor(caller).await?;
        self.enrich(requests).await
    }

    /// Everybody else's requests, newest first, paginated
    pub async fn other_requests(
        &self,
        caller: i64,
        from: u64,
        size: u64,
    ) -> RequestResult<Vec<ItemRequestView>> {
        self.ensure_user_exists(caller).await?;

        let requests = self.repository.find_others(caller, from, size).await?;
        self.enrich(requests).await
    }

    /// One request by ID, visible to any existing user
    pub async fn get_request(&self, caller: i64, request_id: i64) -> RequestResult<ItemRequestView> {
        self.ensure_user_exists(caller).await?;

        let request = self
            .repository
            .find_by_id(request_id)
            .await?
            .ok_or(RequestError::NotFound(request_id))?;

        let mut views = self.enrich(vec![request]).await?;
        Ok(views.remove(0))
    }

    async fn ensure_user_exists(&self, user_id: i64) -> RequestResult<()> {
        let exists = self
            .users
            .exists(user_id)
            .await
            .map_err(|e| RequestError::Internal(e.to_string()))?;
        if !exists {
            return Err(RequestError::UserNotFound(user_id));
        }
        Ok(())
    }

    /// Attach answering items with a single items query
    async fn enrich(&self, requests: Vec<ItemRequest>) -> RequestResult<Vec<ItemRequestView>> {
        let request_ids: Vec<i64> = requests.iter().map(|r| r.id).collect();

        let mut items_by_request: HashMap<i64, Vec<Item>> = HashMap::new();
        let items = self
            .items
            .find_by_request_ids(request_ids)
            .await
            .map_err(|e| RequestError::Internal(e.to_string()))?;
        for item in items {
            if let Some(request_id) = item.request_id {
                items_by_request.entry(request_id).or_default().push(item);
            }
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let items = items_by_request.remove(&request.id).unwrap_or_default();
                ItemRequestView::new(request, items)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockRequestRepository;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use domain_items::{
        Comment, CreateComment, CreateItem, ItemResult, UpdateItem,
    };
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
        Items {}

        #[async_trait]
        impl ItemRepository for Items {
            async fn create(&self, owner_id: i64, input: CreateItem) -> ItemResult<Item>;
            async fn find_by_id(&self, id: i64) -> ItemResult<Option<Item>>;
            async fn find_by_ids(&self, ids: Vec<i64>) -> ItemResult<Vec<Item>>;
            async fn find_by_owner(&self, owner_id: i64) -> ItemResult<Vec<Item>>;
            async fn find_by_request_ids(&self, request_ids: Vec<i64>) -> ItemResult<Vec<Item>>;
            async fn update(&self, id: i64, input: UpdateItem) -> ItemResult<Item>;
            async fn search(&self, text: &str) -> ItemResult<Vec<Item>>;
            async fn add_comment(
                &self,
                item_id: i64,
                author_id: i64,
                input: CreateComment,
            ) -> ItemResult<Comment>;
            async fn comments_for_items(&self, item_ids: Vec<i64>) -> ItemResult<Vec<Comment>>;
        }
    }

    fn sample_request(id: i64, requestor_id: i64, created: DateTime<Utc>) -> ItemRequest {
        ItemRequest {
            id,
            description: "Need a ladder".to_string(),
            requestor_id,
            created,
        }
    }

    fn sample_item(id: i64, request_id: i64) -> Item {
        Item {
            id,
            name: "Ladder".to_string(),
            description: "Six feet".to_string(),
            available: true,
            owner_id: 9,
            request_id: Some(request_id),
        }
    }

    fn service(
        repo: MockRequestRepository,
        users: MockUsers,
        items: MockItems,
    ) -> RequestService<MockRequestRepository> {
        RequestService::new(repo, Arc::new(users), Arc::new(items))
    }

    #[tokio::test]
    async fn create_request_requires_existing_user() {
        let mut repo = MockRequestRepository::new();
        repo.expect_create().never();

        let mut users = MockUsers::new();
        users.expect_exists().with(eq(5)).returning(|_| Ok(false));

        let svc = service(repo, users, MockItems::new());
        let result = svc
            .create_request(
                5,
                CreateItemRequest {
                    description: "Need a ladder".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::UserNotFound(5))));
    }

    #[tokio::test]
    async fn create_request_rejects_blank_description() {
        let mut repo = MockRequestRepository::new();
        repo.expect_create().never();

        let mut users = MockUsers::new();
        users.expect_exists().never();

        let svc = service(repo, users, MockItems::new());
        let result = svc
            .create_request(
                1,
                CreateItemRequest {
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(RequestError::Validation(_))));
    }

    #[tokio::test]
    async fn own_requests_attach_answering_items() {
        let now = Utc::now();
        let mut repo = MockRequestRepository::new();
        repo.expect_find_by_requestor().with(eq(1)).returning(move |_| {
            Ok(vec![
                sample_request(2, 1, now),
                sample_request(1, 1, now - Duration::hours(1)),
            ])
        });

        let mut users = MockUsers::new();
        users.expect_exists().with(eq(1)).returning(|_| Ok(true));

        let mut items = MockItems::new();
        items
            .expect_find_by_request_ids()
            .with(eq(vec![2, 1]))
            .returning(|_| Ok(vec![sample_item(10, 2), sample_item(11, 2)]));

        let svc = service(repo, users, items);
        let views = svc.own_requests(1).await.unwrap();

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, 2);
        assert_eq!(views[0].items.len(), 2);
        assert!(views[1].items.is_empty());
    }

    #[tokio::test]
    async fn get_missing_request_is_not_found() {
        let mut repo = MockRequestRepository::new();
        repo.expect_find_by_id().with(eq(42)).returning(|_| Ok(None));

        let mut users = MockUsers::new();
        users.expect_exists().returning(|_| Ok(true));

        let svc = service(repo, users, MockItems::new());
        let result = svc.get_request(1, 42).await;

        assert!(matches!(result, Err(RequestError::NotFound(42))));
    }

    #[tokio::test]
    async fn other_requests_pass_page_through() {
        let mut repo = MockRequestRepository::new();
        repo.expect_find_others()
            .with(eq(1), eq(20), eq(10))
            .returning(|_, _, _| Ok(Vec::new()));

        let mut users = MockUsers::new();
        users.expect_exists().returning(|_| Ok(true));

        let mut items = MockItems::new();
        items
            .expect_find_by_request_ids()
            .returning(|_| Ok(Vec::new()));

        let svc = service(repo, users, items);
        let views = svc.other_requests(1, 20, 10).await.unwrap();

        assert!(views.is_empty());
    }
}
