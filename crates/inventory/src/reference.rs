//! Static reference lists for autocomplete and item pickers.

use crate::catalog::AvailableItemName;
use crate::item::Section;

pub const COMUNAS: &[&str] = &[
    "Comuna 1", "Comuna 2", "Comuna 3", "Comuna 4", "Comuna 5", "Comuna 6", "Comuna 7",
    "Comuna 8", "Comuna 9", "Comuna 10", "Comuna 11", "Comuna 12", "Comuna 13", "Comuna 14",
    "Comuna 15", "Comuna 16", "Comuna 17", "Comuna 18", "Comuna 19", "Comuna 20", "Comuna 21",
    "Comuna 22",
];

pub const BARRIOS: &[&str] = &[
    "Alameda",
    "Alfonso López",
    "Alto Nápoles",
    "Bretaña",
    "Calima",
    "Ciudad Córdoba",
    "Ciudad Jardín",
    "Ciudad Modelo",
    "El Diamante",
    "El Guabal",
    "El Poblado I",
    "El Retiro",
    "El Vallado",
    "Granada",
    "La Base",
    "La Flora",
    "La Independencia",
    "Los Andes",
    "Los Chorros",
    "Los Guaduales",
    "Manuela Beltrán",
    "Mariano Ramos",
    "Meléndez",
    "Mojica",
    "Petecuy",
    "Potrero Grande",
    "Prados del Norte",
    "Puerto Mallarino",
    "San Antonio",
    "San Fernando",
    "San Luis",
    "Siloé",
    "Terrón Colorado",
    "Unión de Vivienda Popular",
    "Villa del Lago",
];

pub const ESCENARIOS_DEPORTIVOS: &[&str] = &[
    "Cancha de Fútbol",
    "Cancha Sintética",
    "Cancha Múltiple",
    "Placa Deportiva",
    "Polideportivo",
    "Coliseo",
    "Parque Recreativo",
    "Piscina",
    "Pista de Patinaje",
    "Gimnasio al Aire Libre",
    "Cancha de Voleibol Playa",
    "Unidad Recreativa",
];

pub const INMUEBLES: &[&str] = &[
    "Cancha",
    "Graderías",
    "Camerinos",
    "Baños",
    "Cerramiento",
    "Iluminación",
    "Cubierta",
    "Bodega",
    "Caseta de administración",
    "Zona verde",
    "Parque infantil",
    "Pista de trote",
];

pub const MUEBLES: &[&str] = &[
    "Arcos de fútbol",
    "Tableros de baloncesto",
    "Aros de baloncesto",
    "Malla de voleibol",
    "Postes de voleibol",
    "Bancas",
    "Sillas",
    "Mesas",
    "Canecas",
    "Balones",
    "Máquinas biosaludables",
    "Reflectores",
];

/// Static item names for a section.
pub fn items_for(section: Section) -> &'static [&'static str] {
    match section {
        Section::Inmuebles => INMUEBLES,
        Section::Muebles => MUEBLES,
    }
}

/// Initial content of the available-names collection.
pub fn seed_catalog() -> impl Iterator<Item = AvailableItemName> {
    Section::ALL.into_iter().flat_map(|section| {
        items_for(section)
            .iter()
            .map(move |name| AvailableItemName::new(*name, section))
    })
}

/// Owned copy of a static list, for autocomplete inputs.
pub fn options(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_catalog_covers_both_sections() {
        let seeded: Vec<_> = seed_catalog().collect();
        assert_eq!(seeded.len(), INMUEBLES.len() + MUEBLES.len());
        assert!(seeded.iter().any(|e| e.section == Section::Inmuebles));
        assert!(seeded.iter().any(|e| e.section == Section::Muebles));
    }

    #[test]
    fn reference_lists_have_no_duplicates() {
        for list in [COMUNAS, BARRIOS, ESCENARIOS_DEPORTIVOS, INMUEBLES, MUEBLES] {
            let mut seen = std::collections::HashSet::new();
            for name in list {
                assert!(seen.insert(name.to_lowercase()), "duplicate entry {name}");
            }
        }
    }
}
