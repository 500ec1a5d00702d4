// stations.rs

/// A named point on the metro network.
#[derive(Debug, Clone)]
pub struct Station {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

// Station entrances, WGS84. M1 runs south to north, M2 west to east;
// Świętokrzyska is the transfer station and appears once.
const WARSAW_METRO: &[(&str, f64, f64)] = &[
    // M1
    ("Kabaty", 52.1306, 21.0653),
    ("Natolin", 52.1404, 21.0617),
    ("Imielin", 52.1501, 21.0540),
    ("Stokłosy", 52.1566, 21.0489),
    ("Ursynów", 52.1625, 21.0438),
    ("Służew", 52.1731, 21.0354),
    ("Wilanowska", 52.1808, 21.0253),
    ("Wierzbno", 52.1889, 21.0192),
    ("Racławicka", 52.1961, 21.0156),
    ("Pole Mokotowskie", 52.2048, 21.0110),
    ("Politechnika", 52.2190, 21.0147),
    ("Centrum", 52.2298, 21.0118),
    ("Świętokrzyska", 52.2352, 21.0087),
    ("Ratusz Arsenał", 52.2444, 21.0015),
    ("Dworzec Gdański", 52.2587, 20.9990),
    ("Plac Wilsona", 52.2693, 20.9862),
    ("Marymont", 52.2742, 20.9720),
    ("Słodowiec", 52.2780, 20.9662),
    ("Stare Bielany", 52.2806, 20.9563),
    ("Wawrzyszew", 52.2880, 20.9432),
    ("Młociny", 52.2906, 20.9298),
    // M2
    ("Bemowo", 52.2386, 20.9210),
    ("Ulrychów", 52.2366, 20.9336),
    ("Księcia Janusza", 52.2379, 20.9467),
    ("Młynów", 52.2390, 20.9566),
    ("Płocka", 52.2328, 20.9627),
    ("Rondo Daszyńskiego", 52.2302, 20.9840),
    ("Rondo ONZ", 52.2325, 20.9978),
    ("Nowy Świat-Uniwersytet", 52.2355, 21.0180),
    ("Centrum Nauki Kopernik", 52.2414, 21.0285),
    ("Stadion Narodowy", 52.2478, 21.0417),
    ("Dworzec Wileński", 52.2539, 21.0352),
    ("Szwedzka", 52.2606, 21.0437),
    ("Targówek Mieszkaniowy", 52.2672, 21.0490),
    ("Trocka", 52.2713, 21.0563),
    ("Zacisze", 52.2793, 21.0559),
    ("Kondratowicza", 52.2843, 21.0491),
    ("Bródno", 52.2907, 21.0417),
];

pub fn warsaw_metro_stations() -> Vec<Station> {
    WARSAW_METRO
        .iter()
        .map(|&(name, latitude, longitude)| Station {
            name,
            latitude,
            longitude,
        })
        .collect()
}
