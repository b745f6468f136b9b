//! World capability seam
//!
//! The encounter core never touches game state directly. Everything it
//! needs from the host world goes through two traits:
//!
//! - [`WorldApi`]: entity spawning, player queries, stat/scale capability
//!   application. Stat and scale application may be unsupported for a
//!   given entity; that is reported as [`CapabilityMissing`] and callers
//!   treat it as non-fatal.
//! - [`ChestBlocks`]: placing and removing the loot chest block.
//!
//! [`WorldHandle`] wraps both and adds the serialized execution context:
//! timer tasks never mutate world state from their own thread, they hand
//! a closure into [`WorldHandle::execute`] and the per-world driver task
//! runs it. Read-only queries from the tick context may call
//! [`WorldHandle::api`] directly.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

/// A position in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Floor to the integer block coordinate.
    pub fn block_pos(self) -> BlockPos {
        BlockPos {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            z: self.z.floor() as i32,
        }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}

/// Floored integer block coordinate. Used as the chest ledger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Opaque handle to a live entity, valid only within its world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stats the orchestrator can scale on a spawned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Health,
    Damage,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Health => write!(f, "health"),
            Stat::Damage => write!(f, "damage"),
        }
    }
}

/// The world does not support this capability on the given entity.
///
/// Not an error in the fatal sense: the boss spawns unmodified and the
/// caller logs and moves on.
#[derive(Debug, Error)]
#[error("capability '{capability}' not available on entity {entity}")]
pub struct CapabilityMissing {
    pub entity: EntityId,
    pub capability: &'static str,
}

/// Host world capabilities consumed by the encounter core.
///
/// One stable interface: implementors that lack a capability return
/// [`CapabilityMissing`] instead of the core probing for it at runtime.
pub trait WorldApi: Send + Sync {
    /// Spawn an entity of the given kind. `None` means the spawn failed.
    fn spawn_entity(&self, kind: &str, position: Vec3, rotation: Vec3)
    -> Option<(EntityId, Uuid)>;

    /// All players within `radius` of `center`, with their positions.
    fn players_in_radius(&self, center: Vec3, radius: f64) -> Vec<(Uuid, Vec3)>;

    /// Whether the entity still exists and has positive health.
    fn entity_alive_and_healthy(&self, entity: Uuid) -> bool;

    /// Apply a multiplicative modifier to one of the entity's stats.
    fn apply_stat_multiplier(
        &self,
        entity: EntityId,
        stat: Stat,
        multiplier: f32,
    ) -> Result<(), CapabilityMissing>;

    /// Apply a multiplicative modifier to the entity's visual scale.
    fn apply_scale_multiplier(
        &self,
        entity: EntityId,
        multiplier: f32,
    ) -> Result<(), CapabilityMissing>;
}

/// Block-layer collaborator that places and removes the loot chest.
pub trait ChestBlocks: Send + Sync {
    fn place_chest(&self, location: BlockPos);
    fn remove_chest(&self, location: BlockPos);
}

type WorldTask = Box<dyn FnOnce(&dyn WorldApi, &dyn ChestBlocks) + Send>;

/// Handle to one world: its capabilities plus the serialized execution
/// context that timer threads hand mutations into.
pub struct WorldHandle {
    name: String,
    api: Arc<dyn WorldApi>,
    chests: Arc<dyn ChestBlocks>,
    tx: mpsc::UnboundedSender<WorldTask>,
}

impl WorldHandle {
    /// Wrap a world's collaborators and start its driver task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        name: impl Into<String>,
        api: Arc<dyn WorldApi>,
        chests: Arc<dyn ChestBlocks>,
    ) -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = Arc::new(Self {
            name: name.into(),
            api: Arc::clone(&api),
            chests: Arc::clone(&chests),
            tx,
        });
        tokio::spawn(drive(rx, api, chests));
        handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct capability access for read paths on the tick context.
    pub fn api(&self) -> &dyn WorldApi {
        self.api.as_ref()
    }

    pub fn chests(&self) -> &dyn ChestBlocks {
        self.chests.as_ref()
    }

    /// Fire-and-forget handoff into the world's serialized context.
    /// Never blocks the caller.
    pub fn execute(&self, task: impl FnOnce(&dyn WorldApi, &dyn ChestBlocks) + Send + 'static) {
        if self.tx.send(Box::new(task)).is_err() {
            tracing::warn!(world = %self.name, "world executor stopped, dropping task");
        }
    }
}

impl fmt::Debug for WorldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

async fn drive(
    mut rx: mpsc::UnboundedReceiver<WorldTask>,
    api: Arc<dyn WorldApi>,
    chests: Arc<dyn ChestBlocks>,
) {
    while let Some(task) = rx.recv().await {
        task(api.as_ref(), chests.as_ref());
    }
}
