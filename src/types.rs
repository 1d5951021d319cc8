use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct V3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}
#[allow(non_snake_case)]
pub const fn V3<T>(x: T, y: T, z: T) -> V3<T> {
    V3 { x, y, z }
}
pub type BlockPos = V3<i32>;

impl BlockPos {
    /// Squared euclidean distance. A difference of two `i32`s needs 33 bits,
    /// so its square only fits in `i128`.
    pub fn distance_sq(self, other: BlockPos) -> i128 {
        let dx = self.x as i128 - other.x as i128;
        let dy = self.y as i128 - other.y as i128;
        let dz = self.z as i128 - other.z as i128;
        dx * dx + dy * dy + dz * dz
    }
    /// Squared distance ignoring height. Territories are columns.
    pub fn distance_sq_2d(self, other: BlockPos) -> i128 {
        let dx = self.x as i128 - other.x as i128;
        let dz = self.z as i128 - other.z as i128;
        dx * dx + dz * dz
    }
    pub fn to_nbt(self) -> Value {
        Value::IntArray(IntArray::new(vec![self.x, self.y, self.z]))
    }
    pub fn from_nbt(field: &'static str, value: &Value) -> Result<Self> {
        match value {
            Value::IntArray(ints) => match ints[..] {
                [x, y, z] => Ok(V3(x, y, z)),
                _ => Err(Error::malformed(field, "expected 3 ints")),
            },
            _ => Err(Error::malformed(field, "expected an int array")),
        }
    }
}
impl std::fmt::Display for BlockPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Which half of the game a piece of state lives on.
/// The server is authoritative, clients only ever hold views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Server,
    Client,
}

/// The slice of the host world the colony core needs.
pub trait World {
    fn dimension(&self) -> i32;
    fn side(&self) -> Side;
    fn is_remote(&self) -> bool {
        self.side() == Side::Client
    }
}

/// A bare dimension handle, for hosts (and tools) without a richer world type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimension {
    pub id: i32,
    pub side: Side,
}
impl Dimension {
    pub fn server(id: i32) -> Self {
        Self { id, side: Side::Server }
    }
    pub fn client(id: i32) -> Self {
        Self { id, side: Side::Client }
    }
}
impl World for Dimension {
    fn dimension(&self) -> i32 {
        self.id
    }
    fn side(&self) -> Side {
        self.side
    }
}

/// A player as seen by the colony core.
///
/// On a client the only stable identity is the session's own id, while the
/// server knows the account behind the game profile. Ownership is recorded
/// with whichever one the side that created the colony could see.
pub trait Player {
    fn session_id(&self) -> Uuid;
    fn account_id(&self) -> Uuid;
}

pub fn owner_identity(player: &dyn Player, side: Side) -> Uuid {
    match side {
        Side::Client => player.session_id(),
        Side::Server => player.account_id(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_are_squared() {
        assert_eq!(V3(0, 64, 0).distance_sq(V3(3, 68, 0)), 25);
        assert_eq!(V3(0, 0, 0).distance_sq_2d(V3(3, 100, 4)), 25);
    }

    #[test]
    fn far_positions_do_not_overflow() {
        let a = V3(-30_000_000, 0, -30_000_000);
        let b = V3(30_000_000, 0, 30_000_000);
        assert_eq!(a.distance_sq_2d(b), 2 * 60_000_000i128 * 60_000_000);
    }

    #[test]
    fn opposite_corners_of_the_int_range() {
        let low = V3(i32::MIN, i32::MIN, i32::MIN);
        let high = V3(i32::MAX, i32::MAX, i32::MAX);
        let span = u32::MAX as i128;
        assert_eq!(low.distance_sq(high), 3 * span * span);
        assert_eq!(high.distance_sq_2d(low), 2 * span * span);
        assert_eq!(high.distance_sq(high), 0);
    }

    #[test]
    fn positions_survive_nbt() {
        let pos = V3(-12, 70, 4096);
        assert_eq!(BlockPos::from_nbt("Center", &pos.to_nbt()).unwrap(), pos);
        assert!(BlockPos::from_nbt("Center", &Value::Int(3)).is_err());
    }

    struct Steve;
    impl Player for Steve {
        fn session_id(&self) -> Uuid {
            Uuid::from_u128(1)
        }
        fn account_id(&self) -> Uuid {
            Uuid::from_u128(2)
        }
    }

    #[test]
    fn owner_depends_on_side() {
        assert_eq!(owner_identity(&Steve, Side::Client), Uuid::from_u128(1));
        assert_eq!(owner_identity(&Steve, Side::Server), Uuid::from_u128(2));
    }
}
