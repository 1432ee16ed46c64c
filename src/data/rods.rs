use crate::shared::*;

/// Populate the RodRegistry. Stronger rods tire fish faster but strain the
/// line harder, so line regen grows with them.
pub fn populate_rods(registry: &mut RodRegistry) {
    let rods: Vec<RodDef> = vec![
        RodDef {
            id: DEFAULT_ROD_ID.into(),
            name: "Bamboo Rod".into(),
            power: 4.0,
            line_durability: 100.0,
            line_regen: 8.0,
            reeling_speed: 12.0,
        },
        RodDef {
            id: "fiberglass_rod".into(),
            name: "Fiberglass Rod".into(),
            power: 6.0,
            line_durability: 120.0,
            line_regen: 12.0,
            reeling_speed: 16.0,
        },
        RodDef {
            id: "iridium_rod".into(),
            name: "Iridium Rod".into(),
            power: 9.0,
            line_durability: 150.0,
            line_regen: 18.0,
            reeling_speed: 22.0,
        },
    ];

    for def in rods {
        registry.rods.insert(def.id.clone(), def);
    }
}
