use crate::prelude::*;

const TAG_ID: &str = "Id";

/// Opaque identity of a colony, building or request.
///
/// Equality and hashing only ever look at the 128 bit identifier, so a token
/// read back from a save or received from the server is interchangeable with
/// the one it was written from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(Uuid);

impl Token {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; 16] = bytes.try_into().map_err(|_| Error::InvalidIdentity(bytes.len()))?;
        Ok(Self(Uuid::from_bytes(bytes)))
    }
    /// Minecraft's layout for uuids in NBT: four big-endian ints, most significant first.
    pub fn from_int_array(ints: &[i32]) -> Result<Self> {
        let [a, b, c, d]: [i32; 4] = ints.try_into().map_err(|_| Error::InvalidIdentity(ints.len() * 4))?;
        let mut bytes = [0; 16];
        for (dst, int) in bytes.chunks_mut(4).zip([a, b, c, d]) {
            dst.copy_from_slice(&int.to_be_bytes());
        }
        Ok(Self(Uuid::from_bytes(bytes)))
    }
    pub fn to_int_array(&self) -> [i32; 4] {
        let bytes = self.0.as_bytes();
        let mut ints = [0; 4];
        for (int, src) in ints.iter_mut().zip(bytes.chunks(4)) {
            *int = i32::from_be_bytes([src[0], src[1], src[2], src[3]]);
        }
        ints
    }
    pub fn id(&self) -> Uuid {
        self.0
    }
}
impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}
impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
impl std::str::FromStr for Token {
    type Err = uuid::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Constructable for Token {
    const TYPE_ID: &'static str = "colonies:standard_token";
    type Input = Uuid;
}

/// Uuid identities are also how owners are stored, so the raw encoding is shared.
pub fn uuid_to_nbt(id: Uuid) -> Value {
    Value::IntArray(IntArray::new(Token(id).to_int_array().to_vec()))
}
pub fn uuid_from_nbt(nbt: &Compound, field: &'static str) -> Result<Uuid> {
    let ints = nbt::int_array(nbt, field)?;
    Ok(Token::from_int_array(&ints[..])?.0)
}

pub struct TokenFactory;

impl Factory<Token> for TokenFactory {
    fn serialize(&self, _: &FactoryController, token: &Token) -> Result<Compound> {
        let mut nbt = Compound::new();
        nbt.insert(TAG_ID.to_owned(), uuid_to_nbt(token.0));
        Ok(nbt)
    }
    fn deserialize(&self, _: &FactoryController, nbt: &Compound) -> Result<Token> {
        uuid_from_nbt(nbt, TAG_ID).map(Token)
    }
    fn new_instance(&self, _: &FactoryController, input: Uuid) -> Result<Token> {
        Ok(Token(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controller() -> Rc<FactoryController> {
        let mut builder = FactoryControllerBuilder::new();
        builder.register(TokenFactory).unwrap();
        builder.build()
    }

    #[test]
    fn fresh_tokens_differ() {
        assert_ne!(Token::new(), Token::new());
    }

    #[test]
    fn identity_must_be_sixteen_bytes() {
        assert!(matches!(Token::from_bytes(&[0; 15]), Err(Error::InvalidIdentity(15))));
        assert!(matches!(Token::from_int_array(&[1, 2, 3]), Err(Error::InvalidIdentity(12))));
    }

    #[test]
    fn int_array_is_most_significant_first() {
        let token = Token::from_uuid(Uuid::from_u128(0x00000001_00000002_00000003_fffffffe));
        assert_eq!(token.to_int_array(), [1, 2, 3, -2]);
    }

    #[test]
    fn registered_factory_round_trips_known_identity() {
        let controller = controller();
        let id: Uuid = "5c3f2d1e-8a4b-4c6d-9e0f-123456789abc".parse().unwrap();
        let nbt = controller.serialize(&Token::from_uuid(id)).unwrap();
        assert_eq!(controller.deserialize::<Token>(&nbt).unwrap().id(), id);
    }

    #[test]
    fn missing_id_is_malformed() {
        let controller = controller();
        let mut nbt = controller.serialize(&Token::new()).unwrap();
        nbt.insert("Data".into(), Value::Compound(Compound::new()));
        assert!(matches!(
            controller.deserialize::<Token>(&nbt),
            Err(Error::MalformedDocument { field: "Id", .. })
        ));
    }

    #[test]
    fn new_instance_wraps_identity() {
        let id = Uuid::from_u128(42);
        assert_eq!(controller().new_instance::<Token>(id).unwrap(), Token::from_uuid(id));
    }

    proptest! {
        #[test]
        fn any_identity_round_trips(raw in any::<u128>()) {
            let token = Token::from_uuid(Uuid::from_u128(raw));
            prop_assert_eq!(Token::from_int_array(&token.to_int_array()).unwrap(), token);
            prop_assert_eq!(Token::from_bytes(token.id().as_bytes()).unwrap(), token);

            let controller = controller();
            let nbt = controller.serialize(&token).unwrap();
            prop_assert_eq!(controller.deserialize::<Token>(&nbt).unwrap(), token);
        }
    }
}
