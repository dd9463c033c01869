use crate::module::ModuleRegistry;

mod health;

pub(super) fn register(registry: &mut ModuleRegistry) {
    registry.register(health::SOURCE, health::export);
}
