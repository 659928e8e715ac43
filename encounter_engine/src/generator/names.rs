//! Equipment naming tables.

pub const EXCEPTIONAL: &str = "Exceptional";

pub const WEAPON_PREFIXES: &[&str] = &[
    "Blazing", "Frozen", "Thundering", "Shadow", "Radiant",
    "Venomous", "Savage", "Ancient", "Cursed", "Holy",
    "Storm", "Ember", "Crimson", "Obsidian", "Silver",
    "Golden", "Runed", "Howling", "Wicked", "Gleaming",
    "Dread", "Moonlit", "Sunforged", "Bloodied", "Spectral",
    "Titan's", "Dragon's", "Wyrm", "Serpent", "Raven",
    "Wolf's", "Lion's", "Eagle's", "Phantom", "Arcane",
    "Mystic", "Feral", "Brutal", "Swift", "Keen",
    "Jagged", "Serrated", "Blessed", "Doom", "Void",
    "Starfall", "Ironclad", "Grim", "Vengeful", "Eternal",
];

pub const WEAPON_NAMES: &[&str] = &[
    "Longsword", "Broadsword", "Greatsword", "Shortsword", "Rapier",
    "Sabre", "Scimitar", "Katana", "Cutlass", "Claymore",
    "Dagger", "Dirk", "Stiletto", "Kris", "Falchion",
    "Battleaxe", "Hatchet", "Greataxe", "Halberd", "Glaive",
    "Spear", "Pike", "Lance", "Trident", "Javelin",
    "Warhammer", "Maul", "Mace", "Flail", "Morningstar",
    "Club", "Quarterstaff", "Cudgel", "Scythe", "Sickle",
    "Longbow", "Shortbow", "Crossbow", "Sling", "Recurve",
    "Wand", "Staff", "Sceptre", "Rod", "Orb",
    "Whip", "Chakram", "Katar", "Tonfa", "Warblade",
];

pub const ARMOR_PREFIXES: &[&str] = &[
    "Sturdy", "Reinforced", "Guardian's", "Warden's", "Knight's",
    "Sentinel", "Stalwart", "Unyielding", "Warded", "Hallowed",
    "Frostwarden", "Flameguard", "Stormward", "Shadowveil", "Dawnlit",
    "Duskwoven", "Ironbound", "Steelclad", "Mithril", "Adamant",
    "Dragonscale", "Wyrmhide", "Bearhide", "Wolfpelt", "Serpentskin",
    "Runebound", "Spellwoven", "Enchanted", "Blessed", "Sacred",
    "Ancient", "Forgotten", "Royal", "Noble", "Vagabond's",
    "Pilgrim's", "Ranger's", "Templar's", "Paladin's", "Crusader's",
    "Silent", "Verdant", "Ashen", "Gilded", "Tempered",
    "Thorned", "Moonward", "Sunward", "Everlasting", "Aegis",
];

pub const ARMOR_NAMES: &[&str] = &[
    "Plate", "Mail", "Hauberk", "Cuirass", "Breastplate",
    "Brigandine", "Gambeson", "Jerkin", "Tunic", "Robe",
    "Mantle", "Cloak", "Vestments", "Coat", "Surcoat",
    "Tabard", "Harness", "Carapace", "Scale", "Lamellar",
    "Chainmail", "Ringmail", "Splintmail", "Leathers", "Hide",
    "Doublet", "Garb", "Raiment", "Shroud", "Cassock",
    "Aketon", "Corslet", "Cuirbouilli", "Jack", "Byrnie",
    "Panoply", "Regalia", "Battlegear", "Wraps", "Vest",
    "Pelt", "Shell", "Armour", "Husk", "Guard",
    "Bulwark", "Bastion", "Aegis", "Fortress", "Shelter",
];
