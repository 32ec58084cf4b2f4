use env_binder::{Load, Record, define_config};

define_config!(
    #[derive(Debug, Default)]
    pub struct WorkingConfig {
        #[field(env = "TEST_STRING", doc = "Test value")]
        pub test_string: String,

        #[field(env = "TEST_INT", doc = "Test value", default = "123")]
        pub test_int: i32,

        #[field(env = "TEST_BOOL", doc = "Test value", default = "true")]
        pub test_bool: bool,

        #[field(env = "TEST_FLOAT", doc = "Test value", default = "0.5")]
        pub test_float: f64,
    }
);

define_config!(
    #[derive(Debug, Default)]
    pub struct ErrorConfig {
        #[field(env = "ERROR_TEST_STRING", doc = "Test value")]
        pub test_string: String,

        #[field(env = "TEST_WRONG_TYPE", doc = "Test value", default = "42")]
        pub test_wrong_type: i32,

        #[field(env = "ERROR_TEST_SMALL", doc = "Test value", default = "1000")]
        pub test_small: i8,

        #[field(env = "TEST_INT", doc = "Test value")]
        pub test_unsigned: u32,
    }
);

fn main() {
    dotenvy::from_filename("./test.env").ok();
    match std::env::args().nth(1) {
        Some(arg) => match arg.as_str() {
            "default" => test_with_config(),
            "error" => test_with_config_error(),
            "error_result" => test_with_config_error_result(),
            "docs" => generate_docs(),
            "schema" => show_schema(),
            _ => println!(
                "unknown arg: {}. Available: default, error, error_result, docs, schema",
                arg
            ),
        },
        None => {
            println!("Usage: util-cli [command]");
            println!("Commands:");
            println!("  default      - Test binding config with defaults");
            println!("  error        - Test binding config with errors");
            println!("  error_result - Test binding config with errors and Result");
            println!("  docs         - Generate CONFIG.md documentation");
            println!("  schema       - Show the configuration schema");
        }
    };
}

fn test_with_config() {
    let config = WorkingConfig::load();
    println!("Config loaded successfully!");
    println!("  test_string: {}", config.test_string);
    println!("  test_int: {}", config.test_int);
    println!("  test_bool: {}", config.test_bool);
    println!("  test_float: {}", config.test_float);
}

fn test_with_config_error() {
    let _config = ErrorConfig::load();
    println!("you should not see this");
}

fn test_with_config_error_result() {
    match ErrorConfig::load_or_error() {
        Ok(config) => {
            println!("Config loaded successfully!");
            println!("  {:?}", config);
        }
        Err(errors) => {
            eprintln!("Failed to load config:");
            for error in errors {
                eprintln!("\t- {}", error);
            }
        }
    }
    println!("all done");
}

fn generate_docs() {
    println!("Generating documentation for WorkingConfig...");
    match WorkingConfig::schema().write_docs("CONFIG.md") {
        Ok(_) => println!("✓ Documentation written to CONFIG.md"),
        Err(e) => eprintln!("✗ Failed to write documentation: {}", e),
    }

    println!("\nGenerating documentation for ErrorConfig...");
    match ErrorConfig::schema().write_docs("ERROR_CONFIG.md") {
        Ok(_) => println!("✓ Documentation written to ERROR_CONFIG.md"),
        Err(e) => eprintln!("✗ Failed to write documentation: {}", e),
    }
}

fn show_schema() {
    println!("WorkingConfig schema:");
    for field in WorkingConfig::schema().iter() {
        println!("  {}:", field.name);
        println!("    env: {}", field.env);
        println!("    type: {}", field.value_type);
        println!("    description: {}", field.description);
        if let Some(default) = field.default {
            println!("    default: {}", default);
        }
    }
}
