//! The 31 Mexican states plus Mexico City.
//!
//! `provider_names` lists the spellings the Nominatim reverse geocoder has
//! been observed returning for `address.state`; `aliases` lists the
//! lowercase fragments that identify the state inside UCDP's free-text
//! location fields. Both are compared after diacritic folding.

use crate::AdministrativeRegion;

/// Every canonical region, in alphabetical order with Mexico City last.
pub const STATES: &[AdministrativeRegion] = &[
    AdministrativeRegion {
        name: "Aguascalientes",
        wikipedia_slug: "Aguascalientes_(estado)",
        capital: "Aguascalientes",
        population: 1_425_607,
        provider_names: &["Aguascalientes"],
        aliases: &["aguascalientes"],
    },
    AdministrativeRegion {
        name: "Baja California",
        wikipedia_slug: "Baja_California",
        capital: "Mexicali",
        population: 3_769_020,
        provider_names: &["Baja California"],
        aliases: &["baja california", "b.c.", "bc"],
    },
    AdministrativeRegion {
        name: "Baja California Sur",
        wikipedia_slug: "Baja_California_Sur",
        capital: "La Paz",
        population: 798_447,
        provider_names: &["Baja California Sur"],
        aliases: &["baja california sur", "b.c.s.", "bcs"],
    },
    AdministrativeRegion {
        name: "Campeche",
        wikipedia_slug: "Campeche_(estado)",
        capital: "San Francisco de Campeche",
        population: 928_363,
        provider_names: &["Campeche"],
        aliases: &["campeche"],
    },
    AdministrativeRegion {
        name: "Chiapas",
        wikipedia_slug: "Chiapas",
        capital: "Tuxtla Gutiérrez",
        population: 5_543_828,
        provider_names: &["Chiapas"],
        aliases: &["chiapas"],
    },
    AdministrativeRegion {
        name: "Chihuahua",
        wikipedia_slug: "Chihuahua_(estado)",
        capital: "Chihuahua",
        population: 3_741_869,
        provider_names: &["Chihuahua"],
        aliases: &["chihuahua"],
    },
    AdministrativeRegion {
        name: "Coahuila",
        wikipedia_slug: "Coahuila",
        capital: "Saltillo",
        population: 3_146_771,
        provider_names: &["Coahuila", "Coahuila de Zaragoza"],
        aliases: &["coahuila"],
    },
    AdministrativeRegion {
        name: "Colima",
        wikipedia_slug: "Colima_(estado)",
        capital: "Colima",
        population: 731_391,
        provider_names: &["Colima"],
        aliases: &["colima"],
    },
    AdministrativeRegion {
        name: "Durango",
        wikipedia_slug: "Durango_(estado)",
        capital: "Victoria de Durango",
        population: 1_832_650,
        provider_names: &["Durango"],
        aliases: &["durango"],
    },
    AdministrativeRegion {
        name: "Guanajuato",
        wikipedia_slug: "Guanajuato_(estado)",
        capital: "Guanajuato",
        population: 6_166_934,
        provider_names: &["Guanajuato"],
        aliases: &["guanajuato"],
    },
    AdministrativeRegion {
        name: "Guerrero",
        wikipedia_slug: "Guerrero_(estado)",
        capital: "Chilpancingo de los Bravo",
        population: 3_540_685,
        provider_names: &["Guerrero"],
        aliases: &["guerrero"],
    },
    AdministrativeRegion {
        name: "Hidalgo",
        wikipedia_slug: "Hidalgo_(estado_de_México)",
        capital: "Pachuca de Soto",
        population: 3_082_841,
        provider_names: &["Hidalgo"],
        aliases: &["hidalgo"],
    },
    AdministrativeRegion {
        name: "Jalisco",
        wikipedia_slug: "Jalisco",
        capital: "Guadalajara",
        population: 8_348_151,
        provider_names: &["Jalisco"],
        aliases: &["jalisco"],
    },
    AdministrativeRegion {
        name: "Mexico",
        wikipedia_slug: "Estado_de_México",
        capital: "Toluca de Lerdo",
        population: 16_992_418,
        provider_names: &["México", "Estado de México", "Mexico"],
        aliases: &["mexico", "estado de mexico", "edomex", "state of mexico"],
    },
    AdministrativeRegion {
        name: "Michoacan",
        wikipedia_slug: "Michoacán",
        capital: "Morelia",
        population: 4_748_846,
        provider_names: &["Michoacán", "Michoacan", "Michoacán de Ocampo"],
        aliases: &["michoacan"],
    },
    AdministrativeRegion {
        name: "Morelos",
        wikipedia_slug: "Morelos_(estado)",
        capital: "Cuernavaca",
        population: 1_971_520,
        provider_names: &["Morelos"],
        aliases: &["morelos"],
    },
    AdministrativeRegion {
        name: "Nayarit",
        wikipedia_slug: "Nayarit",
        capital: "Tepic",
        population: 1_235_456,
        provider_names: &["Nayarit"],
        aliases: &["nayarit"],
    },
    AdministrativeRegion {
        name: "Nuevo Leon",
        wikipedia_slug: "Nuevo_León",
        capital: "Monterrey",
        population: 5_784_442,
        provider_names: &["Nuevo León", "Nuevo Leon"],
        aliases: &["nuevo leon", "n.l.", "nl"],
    },
    AdministrativeRegion {
        name: "Oaxaca",
        wikipedia_slug: "Oaxaca_(estado)",
        capital: "Oaxaca de Juárez",
        population: 4_132_148,
        provider_names: &["Oaxaca"],
        aliases: &["oaxaca"],
    },
    AdministrativeRegion {
        name: "Puebla",
        wikipedia_slug: "Puebla_(estado)",
        capital: "Heroica Puebla de Zaragoza",
        population: 6_583_278,
        provider_names: &["Puebla"],
        aliases: &["puebla"],
    },
    AdministrativeRegion {
        name: "Queretaro",
        wikipedia_slug: "Querétaro_(estado)",
        capital: "Santiago de Querétaro",
        population: 2_368_467,
        provider_names: &["Querétaro", "Queretaro", "Querétaro de Arteaga"],
        aliases: &["queretaro"],
    },
    AdministrativeRegion {
        name: "Quintana Roo",
        wikipedia_slug: "Quintana_Roo",
        capital: "Chetumal",
        population: 1_857_985,
        provider_names: &["Quintana Roo"],
        aliases: &["quintana roo"],
    },
    AdministrativeRegion {
        name: "San Luis Potosi",
        wikipedia_slug: "San_Luis_Potosí_(estado)",
        capital: "San Luis Potosí",
        population: 2_822_255,
        provider_names: &["San Luis Potosí", "San Luis Potosi"],
        aliases: &["san luis potosi", "s.l.p.", "slp"],
    },
    AdministrativeRegion {
        name: "Sinaloa",
        wikipedia_slug: "Sinaloa",
        capital: "Culiacán",
        population: 3_026_943,
        provider_names: &["Sinaloa"],
        aliases: &["sinaloa"],
    },
    AdministrativeRegion {
        name: "Sonora",
        wikipedia_slug: "Sonora",
        capital: "Hermosillo",
        population: 2_944_840,
        provider_names: &["Sonora"],
        aliases: &["sonora"],
    },
    AdministrativeRegion {
        name: "Tabasco",
        wikipedia_slug: "Tabasco_(estado)",
        capital: "Villahermosa",
        population: 2_402_598,
        provider_names: &["Tabasco"],
        aliases: &["tabasco"],
    },
    AdministrativeRegion {
        name: "Tamaulipas",
        wikipedia_slug: "Tamaulipas",
        capital: "Ciudad Victoria",
        population: 3_527_735,
        provider_names: &["Tamaulipas"],
        aliases: &["tamaulipas"],
    },
    AdministrativeRegion {
        name: "Tlaxcala",
        wikipedia_slug: "Tlaxcala_(estado)",
        capital: "Tlaxcala de Xicohténcatl",
        population: 1_342_977,
        provider_names: &["Tlaxcala"],
        aliases: &["tlaxcala"],
    },
    AdministrativeRegion {
        name: "Veracruz",
        wikipedia_slug: "Veracruz_(estado)",
        capital: "Xalapa-Enríquez",
        population: 8_062_579,
        provider_names: &["Veracruz", "Veracruz de Ignacio de la Llave"],
        aliases: &["veracruz"],
    },
    AdministrativeRegion {
        name: "Yucatan",
        wikipedia_slug: "Yucatán",
        capital: "Mérida",
        population: 2_320_898,
        provider_names: &["Yucatán", "Yucatan"],
        aliases: &["yucatan"],
    },
    AdministrativeRegion {
        name: "Zacatecas",
        wikipedia_slug: "Zacatecas_(estado)",
        capital: "Zacatecas",
        population: 1_622_138,
        provider_names: &["Zacatecas"],
        aliases: &["zacatecas"],
    },
    AdministrativeRegion {
        name: "Ciudad de Mexico",
        wikipedia_slug: "Ciudad_de_México",
        capital: "Ciudad de México",
        population: 9_209_944,
        provider_names: &["Ciudad de México", "Ciudad de Mexico"],
        aliases: &["ciudad de mexico", "cdmx", "mexico city", "df", "d.f."],
    },
];
