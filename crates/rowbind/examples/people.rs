//! Example: export records to an xlsx file and read them back

use rowbind::prelude::*;

#[derive(Debug, Default)]
struct Person {
    id: u32,
    name: String,
    email: Option<String>,
}

record!(Person {
    "Id" => id: u32,
    "Name" => name: String,
    "Email" => email: Option<String>,
});

fn main() -> Result<()> {
    let people = vec![
        Person {
            id: 1,
            name: "Alice".into(),
            email: Some("alice@example.com".into()),
        },
        Person {
            id: 2,
            name: "Bob".into(),
            email: None,
        },
    ];

    let path = std::env::temp_dir().join("people.xlsx");
    let serializer = SheetSerializer::new().with_sheet_name("People");

    serializer.export_file(&people, &path, None)?;
    println!("Saved {} people to {}", people.len(), path.display());

    let back: Vec<Person> = serializer.import_file(&path)?;
    for person in &back {
        println!("{:?}", person);
    }

    Ok(())
}
