//! Plain-text rendering of the directory view.

use chat_directory::directory::{DirectoryView, UserDetails};
use chat_directory::remote::{Message, User};

const NO_SELECTION: &str = "Selecciona un usuario para ver sus detalles";

pub fn print_directory(view: &DirectoryView) {
    println!("Gestión de Usuarios del Chat");
    if view.busy {
        println!("Cargando...");
    }
    if let Some(error) = &view.error {
        println!("! {error}");
    }

    if let Some(form) = &view.form {
        println!();
        println!("Nuevo Usuario");
        println!("  Nombre completo:    {}", form.draft.name);
        println!("  Email:              {}", form.draft.email);
        println!("  Nombre de usuario:  {}", form.draft.username);
        if !form.can_submit {
            println!("  (completa todos los campos para crear)");
        }
    }

    println!();
    println!("Usuarios Registrados ({})", view.users.len());
    for row in &view.users {
        let marker = if row.selected { '>' } else { ' ' };
        println!(
            "{marker} {:>4}  {:<28} {:<18} {:<28} {} posts",
            row.id, row.name, row.handle, row.email, row.post_count
        );
    }

    println!();
    match &view.details {
        Some(details) => print_details(details),
        None => println!("{NO_SELECTION}"),
    }
}

pub fn print_details(details: &UserDetails) {
    println!("Detalles de {}", details.name);
    println!("  Email:     {}", details.email);
    println!("  Username:  {}", details.handle);
    println!("  Website:   {}", details.website);
    println!("  Teléfono:  {}", details.phone);
    println!();
    println!("  Posts del usuario ({})", details.posts.len());
    if details.posts.is_empty() {
        println!("    {}", chat_directory::directory::derive::NO_POSTS);
    }
    for post in &details.posts {
        println!("    - {}", post.title);
        println!("      {}", first_line(&post.body));
    }
}

pub fn print_user(user: &User) {
    println!("{} (id {})", user.name, user.id);
    println!("  Email:     {}", user.email);
    println!("  Username:  @{}", user.username);
    if let Some(website) = &user.website {
        println!("  Website:   {website}");
    }
    if let Some(phone) = &user.phone {
        println!("  Teléfono:  {phone}");
    }
}

pub fn print_messages(messages: &[Message]) {
    if messages.is_empty() {
        println!("{}", chat_directory::directory::derive::NO_POSTS);
        return;
    }
    for message in messages {
        println!("#{:<4} user {:<4} {}", message.id, message.user_id, message.title);
    }
}

fn first_line(body: &str) -> &str {
    body.lines().next().unwrap_or_default()
}
