use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["worldwise"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_places_list() {
    let cli = Cli::try_parse_from(["worldwise", "places", "list"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Places {
            command: PlacesCommands::List
        })
    ));
}

#[test]
fn parses_places_show_id() {
    let cli = Cli::try_parse_from(["worldwise", "places", "show", "73930385"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Places {
            command: PlacesCommands::Show { ref id }
        }) if id == "73930385"
    ));
}

#[test]
fn parses_places_add_with_negative_coordinates() {
    let cli = Cli::try_parse_from([
        "worldwise", "places", "add", "--name", "Lisbon", "--lat", "38.72", "--lng", "-9.14",
        "--country", "Portugal",
    ])
    .unwrap();
    let Some(Commands::Places {
        command: PlacesCommands::Add(args),
    }) = cli.command
    else {
        panic!("expected places add");
    };
    assert_eq!(args.name, "Lisbon");
    assert!((args.lng - -9.14).abs() < f64::EPSILON);
    assert_eq!(args.country.as_deref(), Some("Portugal"));
    assert!(args.emoji.is_none());
}

#[test]
fn places_add_requires_coordinates() {
    assert!(Cli::try_parse_from(["worldwise", "places", "add", "--name", "Lisbon"]).is_err());
}

#[test]
fn parses_center_defaults() {
    let cli = Cli::try_parse_from(["worldwise", "center"]).unwrap();
    let Some(Commands::Center(args)) = cli.command else {
        panic!("expected center");
    };
    assert!(args.url.is_none());
    assert!(!args.locate);
    assert!(args.click_lat.is_none());
}

#[test]
fn center_click_needs_both_coordinates() {
    assert!(Cli::try_parse_from(["worldwise", "center", "--click-lat", "1"]).is_err());
    let cli =
        Cli::try_parse_from(["worldwise", "center", "--click-lat", "1", "--click-lng", "-2"])
            .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Center(CenterArgs {
            click_lat: Some(_),
            click_lng: Some(_),
            ..
        }))
    ));
}
