use uuid::Uuid;

/// Produces statistically unique identifiers
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
