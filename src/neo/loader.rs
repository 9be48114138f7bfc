//! Background loading of the feed snapshot.
//!
//! Reading and parsing run on the async compute pool. Dropping the task
//! cancels it; a finished result replaces every feed body in one step.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on};

use super::feed::{FeedError, NeoRecord, load_feed_file};
use super::seed_from_record;
use crate::animator::PositionAnimator;
use crate::body::BodySource;
use crate::catalog::CatalogFilter;
use crate::config::ImpactConfig;

/// Request to (re)load the feed snapshot at a path.
#[derive(Message, Clone, Debug)]
pub struct LoadFeed(pub PathBuf);

/// Sent after a snapshot has been applied.
#[derive(Message, Clone, Debug)]
pub struct FeedLoaded {
    pub count: usize,
}

/// Feed loading status for display.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FeedStatus {
    #[default]
    Idle,
    Loading(PathBuf),
    Loaded(usize),
    Failed(String),
}

/// In-flight load, if any.
#[derive(Resource, Default)]
pub struct FeedLoadTask {
    task: Option<Task<Result<Vec<NeoRecord>, FeedError>>>,
    pub status: FeedStatus,
}

impl FeedLoadTask {
    pub fn is_loading(&self) -> bool {
        self.task.is_some()
    }

    /// Abort the in-flight load; nothing from it is applied.
    pub fn cancel(&mut self) {
        if self.task.take().is_some() {
            info!("Feed load cancelled");
            self.status = FeedStatus::Idle;
        }
    }
}

pub struct FeedLoaderPlugin;

impl Plugin for FeedLoaderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FeedLoadTask>()
            .add_message::<LoadFeed>()
            .add_message::<FeedLoaded>()
            .add_systems(Startup, request_configured_feed)
            .add_systems(
                Update,
                (start_feed_load, apply_feed_load, drop_stale_selection).chain(),
            );
    }
}

/// Queue the snapshot named by the config, if any.
fn request_configured_feed(config: Res<ImpactConfig>, mut requests: MessageWriter<LoadFeed>) {
    if let Some(path) = &config.feed.path {
        requests.write(LoadFeed(path.clone()));
    }
}

/// Spawn a load task for the latest request, replacing any running one.
fn start_feed_load(mut requests: MessageReader<LoadFeed>, mut loader: ResMut<FeedLoadTask>) {
    let Some(LoadFeed(path)) = requests.read().last().cloned() else {
        return;
    };

    loader.cancel();
    let task_path = path.clone();
    let task = AsyncComputeTaskPool::get().spawn(async move { load_feed_file(task_path) });
    loader.task = Some(task);
    loader.status = FeedStatus::Loading(path);
}

/// Apply a finished load atomically.
fn apply_feed_load(
    mut loader: ResMut<FeedLoadTask>,
    mut animator: ResMut<PositionAnimator>,
    config: Res<ImpactConfig>,
    mut loaded: MessageWriter<FeedLoaded>,
) {
    let finished = loader.task.as_ref().is_some_and(|t| t.is_finished());
    if !finished {
        return;
    }
    let Some(task) = loader.task.take() else {
        return;
    };

    match block_on(task) {
        Ok(records) => {
            let model = config.impact_model();
            let seeds = records.iter().map(|r| seed_from_record(r, &model)).collect();
            match animator.replace_source(BodySource::Feed, seeds) {
                Ok(ids) => {
                    info!("Applied {} feed bodies", ids.len());
                    loader.status = FeedStatus::Loaded(ids.len());
                    loaded.write(FeedLoaded { count: ids.len() });
                }
                Err(err) => {
                    warn!("Feed bodies rejected: {}", err);
                    loader.status = FeedStatus::Failed(err.to_string());
                }
            }
        }
        Err(err) => {
            warn!("Feed load failed: {}", err);
            loader.status = FeedStatus::Failed(err.to_string());
        }
    }
}

/// Clear a selection whose body was replaced by a newly applied snapshot.
fn drop_stale_selection(
    mut loaded: MessageReader<FeedLoaded>,
    animator: Res<PositionAnimator>,
    mut filter: ResMut<CatalogFilter>,
) {
    if loaded.read().count() == 0 {
        return;
    }
    if let Some(id) = filter.selected
        && animator.body(id).is_none()
    {
        debug!("Selected body {:?} left with the old snapshot", id);
        filter.selected = None;
    }
}
