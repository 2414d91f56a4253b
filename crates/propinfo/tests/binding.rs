use propinfo::prelude::*;

#[derive(Debug, Default, Model)]
pub struct Item {
    #[prop(required)]
    pub qty: i32,
}

// nothing else in this binary touches `Item::class_info` first
#[test]
fn accessor_alone_binds_the_owning_class() {
    let owner = Item::qty_property().owning_class().expect("bound");

    assert_eq!(owner.name(), "Item");
}
