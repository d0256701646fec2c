mod common;

use common::{create_psr4_workspace, write_workspace};
use phpantom_reflection::{
    AggregateSourceLocator, Config, DirectoriesSourceLocator, ErrorKind, Identifier,
    NamedReflectable, Reflector, SingleFileSourceLocator, SourceLocator, SourceOrigin,
    StringSourceLocator,
};

const COMPOSER_JSON: &str = r#"{
    "autoload": { "psr-4": { "Acme\\": "src/" } },
    "autoload-dev": { "psr-4": { "Acme\\Tests\\": "tests/" } }
}"#;

#[test]
fn test_identifier_normalisation() {
    let id = Identifier::new("\\Acme\\Model\\User");
    assert_eq!(id.name(), "Acme\\Model\\User");
    assert_eq!(id.short_name(), "User");
    assert_eq!(id.cache_key(), "acme\\model\\user");
    assert_eq!(id.to_string(), "Acme\\Model\\User");
}

#[test]
fn test_psr4_workspace_reflection() {
    let (reflector, _dir) = create_psr4_workspace(
        COMPOSER_JSON,
        &[
            (
                "src/Model/User.php",
                "<?php\nnamespace Acme\\Model;\n\nclass User extends Base {\n    public $name;\n}\n",
            ),
            (
                "src/Model/Base.php",
                "<?php\nnamespace Acme\\Model;\n\nclass Base {\n    protected $id = 1;\n}\n",
            ),
            (
                "tests/UserTest.php",
                "<?php\nnamespace Acme\\Tests;\n\nclass UserTest {\n    private $fixture;\n}\n",
            ),
        ],
    );

    let user = reflector.reflect("Acme\\Model\\User").unwrap();
    assert_eq!(user.get_name(), "Acme\\Model\\User");

    // The parent is found through the autoloader as well.
    let id = user.get_property("id").unwrap();
    assert_eq!(id.get_declaring_class_name(), "Acme\\Model\\Base");

    let test = reflector.reflect("Acme\\Tests\\UserTest").unwrap();
    assert!(test.get_property("fixture").unwrap().is_private());

    let err = reflector.reflect("Acme\\Model\\Missing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_single_file_locator() {
    let dir = write_workspace(&[("legacy.php", "<?php\nclass Legacy { public $x = 1; }\n")]);
    let path = dir.path().join("legacy.php");

    let locator = SingleFileSourceLocator::new(&path);
    let located = locator.locate(&Identifier::new("Legacy")).unwrap().unwrap();
    assert_eq!(located.origin, SourceOrigin::File(path.clone()));

    let reflector = Reflector::new(SingleFileSourceLocator::new(&path));
    assert!(reflector.reflect("Legacy").unwrap().has_property("x"));
    assert_eq!(reflector.reflect("Other").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_single_file_locator_missing_file_is_io_error() {
    let dir = write_workspace(&[]);
    let reflector = Reflector::new(SingleFileSourceLocator::new(dir.path().join("gone.php")));
    assert_eq!(reflector.reflect("Gone").unwrap_err().kind(), ErrorKind::Io);
}

#[test]
fn test_string_locator_origin() {
    let locator = StringSourceLocator::new("<?php class A {}");
    let located = locator.locate(&Identifier::new("A")).unwrap().unwrap();
    assert!(matches!(located.origin, SourceOrigin::InMemory(_)));
    assert_eq!(located.source, "<?php class A {}");
}

#[test]
fn test_aggregate_tries_every_candidate() {
    let locator = AggregateSourceLocator::new()
        .with(StringSourceLocator::new("<?php class First {}"))
        .with(StringSourceLocator::new("<?php class Second { public $b; }"));
    assert_eq!(locator.len(), 2);
    assert_eq!(locator.locate_all(&Identifier::new("Second")).unwrap().len(), 2);

    let reflector = Reflector::new(locator);
    // The first candidate does not declare `Second`; the reflector moves on.
    assert!(reflector.reflect("Second").unwrap().has_property("b"));
    assert!(reflector.reflect("First").is_ok());
    assert_eq!(reflector.reflect("Third").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_empty_aggregate_finds_nothing() {
    let reflector = Reflector::new(AggregateSourceLocator::new());
    assert_eq!(reflector.reflect("Anything").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn test_directories_locator_indexes_classes() {
    let dir = write_workspace(&[
        ("lib/a.php", "<?php\nnamespace Lib;\nclass Alpha { public $a; }\ninterface Beta {}\n"),
        ("lib/nested/c.php", "<?php\nnamespace Lib\\Nested;\nclass Gamma {}\n"),
        ("lib/readme.txt", "class NotPhp {}"),
    ]);

    let locator = DirectoriesSourceLocator::new([dir.path().join("lib")]);
    assert_eq!(locator.indexed_count(), 3);
    assert!(locator.locate(&Identifier::new("lib\\alpha")).unwrap().is_some());
    assert!(locator.locate(&Identifier::new("NotPhp")).unwrap().is_none());

    let reflector = Reflector::new(locator);
    assert!(reflector.reflect("Lib\\Nested\\Gamma").is_ok());
    assert!(reflector.reflect("Lib\\Beta").unwrap().is_interface());
}

#[test]
fn test_config_driven_locator_chain() {
    let dir = write_workspace(&[
        (
            ".phpantom-reflect.toml",
            "[locator]\ncomposer = false\nfiles = [\"boot.php\"]\ndirectories = [\"lib\"]\n",
        ),
        ("boot.php", "<?php\nclass Boot { public static $booted = true; }\n"),
        ("lib/Thing.php", "<?php\nclass Thing { protected $parts = []; }\n"),
    ]);

    let config = Config::load(dir.path()).unwrap();
    assert!(!config.locator.composer);

    let reflector = Reflector::new(config.build_locator(dir.path()).unwrap());
    assert!(reflector.reflect("Boot").unwrap().get_property("booted").unwrap().is_static());
    assert!(reflector.reflect("Thing").unwrap().get_property("parts").unwrap().is_protected());
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = write_workspace(&[(".phpantom-reflect.toml", "[locator\n")]);
    assert_eq!(Config::load(dir.path()).unwrap_err().kind(), ErrorKind::Config);
}
