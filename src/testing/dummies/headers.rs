use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

/// `n` anonymous attributes, `e` (edible) positive and `p` (poisonous) negative.
pub fn mushroom_header(n: usize) -> Arc<InstanceHeader> {
    Arc::new(InstanceHeader::anonymous("mushrooms".into(), n, "e", "p"))
}
