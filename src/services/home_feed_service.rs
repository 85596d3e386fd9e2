use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use crate::config::FeedLimits;
use crate::domain::{Article, HomeFeedState, Section, SectionState, SessionContext};
use crate::errors::{FeedError, FeedResult};
use crate::feed::{
    backfill_other, claim_ids, dedup_by_id, exclude_claimed, split_at_limit, ClaimSet, Split,
};
use crate::gateway::ArticleGateway;
use crate::storage::traits::FollowRepository;

/// Result of one home feed load.
///
/// Keeps the Following overflow pool alongside the published state so a
/// retry of the Other section can backfill from the same pool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedLoad {
    pub state: HomeFeedState,
    overflow: Vec<Article>,
}

impl FeedLoad {
    pub fn overflow(&self) -> &[Article] {
        &self.overflow
    }

    /// Earliest section whose phase failed; a retry restarts there.
    fn retry_from(&self) -> Option<Section> {
        self.state.failed_sections().into_iter().min()
    }
}

/// Composes the Trending, Following and Other sections of the home feed.
pub struct HomeFeedService<G: ArticleGateway, R: FollowRepository> {
    gateway: G,
    follows: R,
    session: Arc<SessionContext>,
    limits: FeedLimits,
    state_tx: watch::Sender<HomeFeedState>,
}

impl<G: ArticleGateway, R: FollowRepository> HomeFeedService<G, R> {
    pub fn new(gateway: G, follows: R, session: Arc<SessionContext>, limits: FeedLimits) -> Self {
        let (state_tx, _) = watch::channel(HomeFeedState::default());

        Self {
            gateway,
            follows,
            session,
            limits,
            state_tx,
        }
    }

    pub fn limits(&self) -> FeedLimits {
        self.limits
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Receiver for every state published by this service
    pub fn subscribe(&self) -> watch::Receiver<HomeFeedState> {
        self.state_tx.subscribe()
    }

    /// Latest published state
    pub fn current_state(&self) -> HomeFeedState {
        self.state_tx.borrow().clone()
    }

    /// Run all phases from scratch.
    pub async fn load(&self) -> FeedLoad {
        info!(user = self.session.user_id(), "loading home feed");
        self.run_from(Section::Trending, FeedLoad::default()).await
    }

    /// Re-run the earliest failed phase and every phase after it.
    ///
    /// Sections composed before the failure are kept and still claim their
    /// articles. A load without errors is returned as is.
    pub async fn retry(&self, previous: &FeedLoad) -> FeedLoad {
        match previous.retry_from() {
            Some(start) => {
                info!(from = %start, "retrying home feed");
                self.run_from(start, previous.clone()).await
            }
            None => previous.clone(),
        }
    }

    async fn run_from(&self, start: Section, base: FeedLoad) -> FeedLoad {
        let mut state = base.state;
        for section in Section::ALL.into_iter().filter(|s| *s >= start) {
            state = state.with_section(section, SectionState::Loading);
        }
        if start <= Section::Following {
            state = state.with_following_empty(false);
        }
        self.publish(&state);

        let mut claims = ClaimSet::new();

        if start <= Section::Trending {
            let trending = match self.trending_phase().await {
                Ok(articles) => SectionState::Success(articles),
                Err(e) => {
                    warn!(error = %e, network = e.is_network(), "trending phase failed");
                    SectionState::Error
                }
            };
            state = state.with_section(Section::Trending, trending);
            self.publish(&state);
        }
        if let Some(articles) = state.trending.articles() {
            claim_ids(&mut claims, articles);
        }

        let mut overflow = base.overflow;

        if start <= Section::Following {
            match self.following_phase(&claims).await {
                Ok(Split { taken, overflow: rest }) => {
                    let is_empty = taken.is_empty();
                    overflow = rest;
                    state = state
                        .with_section(Section::Following, SectionState::Success(taken))
                        .with_following_empty(is_empty);
                }
                Err(e) => {
                    warn!(error = %e, network = e.is_network(), "following phase failed");
                    overflow = Vec::new();
                    state = state.with_section(Section::Following, SectionState::Error);
                }
            }
            self.publish(&state);
        }
        if let Some(articles) = state.following.articles() {
            claim_ids(&mut claims, articles);
        }

        let slugs = match self.discovery_phase().await {
            Ok(slugs) => slugs,
            Err(e) => {
                warn!(error = %e, "publication discovery failed, continuing without publications");
                Vec::new()
            }
        };

        let other = match self.other_phase(&slugs, &claims, &overflow).await {
            Ok(articles) => SectionState::Success(articles),
            Err(e) => {
                warn!(error = %e, network = e.is_network(), "other phase failed");
                SectionState::Error
            }
        };
        state = state.with_section(Section::Other, other);
        self.publish(&state);

        info!(failed = ?state.failed_sections(), "home feed load finished");

        FeedLoad { state, overflow }
    }

    fn publish(&self, state: &HomeFeedState) {
        self.state_tx.send_replace(state.clone());
    }

    async fn trending_phase(&self) -> FeedResult<Vec<Article>> {
        let mut articles = self.gateway.fetch_trending(self.limits.trending).await?;
        articles.truncate(self.limits.trending);
        debug!(count = articles.len(), "trending phase done");
        Ok(articles)
    }

    async fn following_phase(&self, claims: &ClaimSet) -> FeedResult<Split> {
        let follows = self
            .follows
            .get_followed_publication_slugs(self.session.user_id())?;

        if follows.is_empty() {
            debug!("user follows no publications");
            return Ok(Split::default());
        }

        let candidates = self.gateway.fetch_by_publication_slugs(&follows).await?;
        let mut candidates = exclude_claimed(dedup_by_id(candidates), claims);
        candidates.sort_by(|a, b| b.published_date.cmp(&a.published_date));

        let split = split_at_limit(candidates, self.limits.following);
        debug!(
            count = split.taken.len(),
            overflow = split.overflow.len(),
            "following phase done"
        );
        Ok(split)
    }

    async fn discovery_phase(&self) -> FeedResult<Vec<String>> {
        self.gateway.fetch_all_publication_slugs().await
    }

    async fn other_phase(
        &self,
        slugs: &[String],
        claims: &ClaimSet,
        overflow: &[Article],
    ) -> FeedResult<Vec<Article>> {
        let sample = self.gateway.fetch_shuffled_by_publication_slugs(slugs).await?;
        let primary = split_at_limit(
            exclude_claimed(dedup_by_id(sample), claims),
            self.limits.other,
        )
        .taken;
        let primary_len = primary.len();

        // A saved pool may predate the claims of a retried load
        let pool = exclude_claimed(overflow.to_vec(), claims);
        let articles = backfill_other(primary, &pool, self.limits.other, &mut rand::thread_rng());
        debug!(
            count = articles.len(),
            backfilled = articles.len() - primary_len,
            "other phase done"
        );
        Ok(articles)
    }
}

impl<G, R> HomeFeedService<G, R>
where
    G: ArticleGateway + 'static,
    R: FollowRepository + 'static,
{
    /// Start a load on the runtime. Dropping the handle cancels it.
    pub fn spawn_load(self: &Arc<Self>) -> FeedLoadHandle {
        let token = CancellationToken::new();
        let child = token.child_token();
        let service = Arc::clone(self);

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {
                    debug!("home feed load cancelled");
                    Err(FeedError::Cancelled)
                }
                load = service.load() => Ok(load),
            }
        });

        FeedLoadHandle {
            token: token.clone(),
            task,
            guard: token.drop_guard(),
        }
    }
}

/// Owner of an in-flight load started by [`HomeFeedService::spawn_load`].
pub struct FeedLoadHandle {
    token: CancellationToken,
    task: JoinHandle<FeedResult<FeedLoad>>,
    guard: DropGuard,
}

impl FeedLoadHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn join(self) -> FeedResult<FeedLoad> {
        let FeedLoadHandle { task, guard, .. } = self;
        let result = task
            .await
            .map_err(|e| FeedError::TaskFailed(e.to_string()))?;
        let _token = guard.disarm();
        result
    }
}
