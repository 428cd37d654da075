// grawlix-core/tests/censor_integration_tests.rs
//
// End-to-end censoring scenarios over the default catalog, exercised in
// fixed-replacement mode so outputs are exact, plus whitelisting, custom
// filters, custom styles, and plugin loading through the public API.

use std::sync::Arc;

use test_log::test;

use grawlix_core::{
    Censor, FilterDescriptor, GrawlixOptions, GrawlixPlugin, PluginEntry, PluginReference,
    StyleChoice, StyleDescriptor,
};

fn fixed_mode(style: &str) -> GrawlixOptions {
    GrawlixOptions {
        style: Some(StyleChoice::from(style)),
        randomize: Some(false),
        ..GrawlixOptions::default()
    }
}

fn censor_in(style: &str, text: &str) -> String {
    Censor::new().censor_with(text, &fixed_mode(style)).unwrap()
}

#[test]
fn ascii_fixed_replacements() {
    assert_eq!(
        censor_in("ascii", "fuck this shit I'm out"),
        "%!&# this $#!% I'm out"
    );
    assert_eq!(
        censor_in("ascii", "you dumbasses don't know who you're messing with!"),
        "you dumb@$$#$ don't know who you're messing with!"
    );
    assert_eq!(
        censor_in("ascii", "well, you PISSED ME OFF!"),
        "well, you &!$#ED ME OFF!"
    );
    assert_eq!(
        censor_in("ascii", "man this shit is so tits"),
        "man this $#!% is so %!%$"
    );
    assert_eq!(
        censor_in("ascii", "you guys are such assholes"),
        "you guys are such @$$#%!&$"
    );
    assert_eq!(censor_in("ascii", "bitches say what?"), "%!#*%es say what?");
    assert_eq!(
        censor_in("ascii", "Hand me the keys, you fucking cocksucker."),
        "Hand me the keys, you %!&#ing #*#%$!#%er."
    );
    assert_eq!(
        censor_in(
            "ascii",
            "Give me the fucking keys, you fucking cocksucking motherfucker, aaarrrghh."
        ),
        "Give me the %!&#ing keys, you %!&#ing #*#%$!#%ing %*^##*%!&#er, aaarrrghh."
    );
    assert_eq!(censor_in("ascii", "PM ME YOUR T1TT1E$"), "PM ME YOUR %!%%!#$");
}

#[test]
fn nextwave_fills_with_skulls() {
    assert_eq!(
        censor_in("nextwave", "fuck this shit I'm out"),
        "☠☠☠☠ this ☠☠☠☠ I'm out"
    );
    assert_eq!(
        censor_in("nextwave", "you dumbasses don't know who you're messing with!"),
        "you dumb☠☠☠☠☠ don't know who you're messing with!"
    );
    assert_eq!(
        censor_in("nextwave", "well, you PISSED ME OFF!"),
        "well, you ☠☠☠☠ED ME OFF!"
    );
    assert_eq!(
        censor_in("nextwave", "man this shit is so tits"),
        "man this ☠☠☠☠ is so ☠☠☠☠"
    );
    assert_eq!(
        censor_in("nextwave", "you guys are such assholes"),
        "you guys are such ☠☠☠☠☠☠☠☠"
    );
    assert_eq!(
        censor_in("nextwave", "bitches say what?"),
        "☠☠☠☠☠es say what?"
    );
    assert_eq!(
        censor_in("nextwave", "Hand me the keys, you fucking cocksucker."),
        "Hand me the keys, you ☠☠☠☠ing ☠☠☠☠☠☠☠☠er."
    );
    assert_eq!(
        censor_in(
            "nextwave",
            "Give me the fucking keys, you fucking cocksucking motherfucker, aaarrrghh."
        ),
        "Give me the ☠☠☠☠ing keys, you ☠☠☠☠ing ☠☠☠☠☠☠☠☠ing ☠☠☠☠☠☠☠☠☠☠er, aaarrrghh."
    );
    assert_eq!(censor_in("nextwave", "PM ME YOUR T1TT1E$"), "PM ME YOUR ☠☠☠☠☠☠☠");
}

#[test]
fn redacted_fills_with_blocks() {
    assert_eq!(
        censor_in("redacted", "fuck this shit I'm out"),
        "████ this ████ I'm out"
    );
    assert_eq!(
        censor_in("redacted", "you dumbasses don't know who you're messing with!"),
        "you dumb█████ don't know who you're messing with!"
    );
    assert_eq!(
        censor_in("redacted", "Hand me the keys, you fucking cocksucker."),
        "Hand me the keys, you ████ing ████████er."
    );
    assert_eq!(censor_in("redacted", "PM ME YOUR T1TT1E$"), "PM ME YOUR ███████");
}

#[test]
fn asterix_fills_with_stars() {
    assert_eq!(
        censor_in("asterix", "fuck this shit I'm out"),
        "**** this **** I'm out"
    );
    assert_eq!(
        censor_in("asterix", "you guys are such assholes"),
        "you guys are such ********"
    );
    assert_eq!(
        censor_in(
            "asterix",
            "Give me the fucking keys, you fucking cocksucking motherfucker, aaarrrghh."
        ),
        "Give me the ****ing keys, you ****ing ********ing **********er, aaarrrghh."
    );
}

#[test]
fn censoring_is_idempotent() {
    let censor = Censor::new();
    let options = fixed_mode("ascii");
    for text in [
        "fuck this shit I'm out",
        "you dumbasses don't know who you're messing with!",
        "Give me the fucking keys, you fucking cocksucking motherfucker, aaarrrghh.",
        "you guys are such assholes",
    ] {
        let once = censor.censor_with(text, &options).unwrap();
        let twice = censor.censor_with(&once, &options).unwrap();
        assert_eq!(once, twice, "double censoring changed {text:?}");
    }
}

#[test]
fn whitelisted_words_are_left_alone() {
    let censor = Censor::new();
    let options = GrawlixOptions {
        allowed: vec!["dick".to_string()],
        ..fixed_mode("ascii")
    };
    assert_eq!(
        censor.censor_with("his young ward Dick Grayson", &options).unwrap(),
        "his young ward Dick Grayson"
    );
}

#[test]
fn whitelisting_disarms_the_probe_too() {
    let censor = Censor::new();
    let allowed: Vec<String> = ["motherfucker", "motherfuck", "fuck", "cocksuck"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    assert!(!censor
        .is_obscene_with("motherfucker, motherfuck, fuck, cocksuck", &[], &allowed)
        .unwrap());
    // Without the whitelist the same text is obscene.
    assert!(censor
        .is_obscene_with("motherfucker, motherfuck, fuck, cocksuck", &[], &[])
        .unwrap());
}

#[test]
fn custom_filters_add_and_replace() {
    let censor = Censor::new();

    // Brand-new filter.
    let options = GrawlixOptions {
        filters: vec![FilterDescriptor::new("frak", r"\bfrak\b")],
        ..fixed_mode("redacted")
    };
    assert_eq!(
        censor.censor_with("frak this", &options).unwrap(),
        "████ this"
    );

    // Full replacement: a stricter 'fuck' that no longer matches the
    // spaced-out spelling the default catches.
    let options = GrawlixOptions {
        filters: vec![FilterDescriptor::new("fuck", r"\bfuck\b")],
        ..fixed_mode("redacted")
    };
    assert_eq!(censor.censor_with("f.u.c.k fuck", &options).unwrap(), "f.u.c.k ████");
}

#[test]
fn custom_styles_and_ad_hoc_active_styles() {
    let censor = Censor::new();

    // Register a new style, then select it by name.
    let options = GrawlixOptions {
        styles: vec![StyleDescriptor::named("dots").with_fill('•')],
        style: Some(StyleChoice::from("dots")),
        randomize: Some(false),
        ..GrawlixOptions::default()
    };
    assert_eq!(censor.censor_with("fuck", &options).unwrap(), "••••");

    // Or hand the resolver an ad hoc style descriptor directly.
    let options = GrawlixOptions {
        style: Some(StyleChoice::from(StyleDescriptor::named("waves").with_fill('~'))),
        randomize: Some(false),
        ..GrawlixOptions::default()
    };
    assert_eq!(censor.censor_with("shit", &options).unwrap(), "~~~~");

    // Or a pre-built style entry.
    let options = GrawlixOptions {
        style: Some(StyleChoice::from(grawlix_core::GrawlixStyle::new("solid", "#"))),
        randomize: Some(false),
        ..GrawlixOptions::default()
    };
    assert_eq!(censor.censor_with("fuck", &options).unwrap(), "####");
}

#[test]
fn generator_backed_styles_drive_output() {
    let censor = Censor::new();
    let options = GrawlixOptions {
        style: Some(StyleChoice::from(
            StyleDescriptor::named("alternating")
                .with_generator(Arc::new(|len| {
                    (0..len).map(|i| if i % 2 > 0 { '!' } else { '*' }).collect()
                })),
        )),
        ..GrawlixOptions::default()
    };
    assert_eq!(censor.censor_with("fuck", &options).unwrap(), "*!*!");
}

#[test]
fn plugins_extend_the_catalogs_end_to_end() {
    let plugin = GrawlixPlugin::new("frontier")
        .with_filters(vec![{
            let mut d = FilterDescriptor::new("tarnation", r"\btarnation\b");
            d.style = Some("old-west".to_string());
            d
        }])
        .with_styles(vec![StyleDescriptor::named("old-west").with_fill('✝')]);

    let mut censor = Censor::new();
    censor.load_plugin(plugin);
    censor.set_defaults(GrawlixOptions {
        randomize: Some(false),
        ..GrawlixOptions::default()
    });

    // The plugin filter uses its style override; default filters still use
    // the active style.
    assert_eq!(
        censor.censor("what in tarnation, you bastard").unwrap(),
        "what in ✝✝✝✝✝✝✝✝✝, you %@$%@*#"
    );
}

#[test]
fn plugin_factories_see_plugin_and_global_options() {
    let factory: grawlix_core::PluginFactory = Arc::new(|plugin_options, global_options| {
        assert_eq!(plugin_options["strictness"], 11);
        assert!(global_options.randomize.is_some());
        Ok(GrawlixPlugin::new("configured")
            .with_filters(vec![FilterDescriptor::new("gosh", r"\bgosh\b")]))
    });
    let options = GrawlixOptions {
        plugins: vec![PluginEntry::with_options(
            PluginReference::Factory(factory),
            serde_json::json!({ "strictness": 11 }),
        )],
        ..fixed_mode("redacted")
    };
    let settings = grawlix_core::parse_options(&options).unwrap();
    assert_eq!(settings.loaded_plugins, vec!["configured".to_string()]);
    assert_eq!(
        grawlix_core::engine::censor("gosh darn", &settings).unwrap(),
        "████ darn"
    );
}

#[test]
fn random_mode_respects_generation_invariants() {
    let censor = Censor::new();
    for _ in 0..200 {
        let out = censor.censor("fuck").unwrap();
        let chars: Vec<char> = out.chars().collect();
        assert_eq!(chars.len(), 4);
        assert!(chars.iter().all(|c| "@!#$%^&*".contains(*c)));
        assert!(chars.windows(2).all(|w| w[0] != w[1]));
        assert_ne!(chars.last(), Some(&'!'));
    }
}
