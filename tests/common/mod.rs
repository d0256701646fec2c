#![allow(dead_code)]

use phpantom_reflection::{Reflector, StringSourceLocator};
use std::fs;

/// A reflector over a single in-memory PHP source.
pub fn reflector_for(source: &str) -> Reflector {
    Reflector::new(StringSourceLocator::new(source))
}

/// One class exercising every kind of property declaration the reflection
/// tests care about.
pub const EXAMPLE_CLASS: &str = concat!(
    "<?php\n",
    "namespace Fixture;\n",
    "\n",
    "class ExampleClass\n",
    "{\n",
    "    const MY_CONST_1 = 123;\n",
    "\n",
    "    /**\n",
    "     * @var int|float|\\stdClass\n",
    "     */\n",
    "    private $privateProperty;\n",
    "\n",
    "    /**\n",
    "     * @var bool|bool[]|bool[][]\n",
    "     */\n",
    "    protected $protectedProperty;\n",
    "\n",
    "    /**\n",
    "     * @var string\n",
    "     */\n",
    "    public $publicProperty;\n",
    "\n",
    "    public static $publicStaticProperty;\n",
    "\n",
    "    public $withDefault = 123;\n",
    "\n",
    "    public function __construct(private readonly ?int $promoted = null) {}\n",
    "}\n",
);

/// Create a temporary workspace with a `composer.json` and PHP files, then
/// return a reflector that resolves through its PSR-4 rules.
pub fn create_psr4_workspace(
    composer_json: &str,
    files: &[(&str, &str)],
) -> (Reflector, tempfile::TempDir) {
    let dir = write_workspace(files);
    fs::write(dir.path().join("composer.json"), composer_json)
        .expect("failed to write composer.json");

    let context = phpantom_reflection::AutoloadContext::composer(dir.path())
        .expect("failed to read composer.json");
    let reflector = Reflector::new(phpantom_reflection::AutoloadSourceLocator::new(context));
    (reflector, dir)
}

/// Create a temporary directory holding the given files.
pub fn write_workspace(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write PHP file");
    }
    dir
}
