//! Demo data for a fresh console session.
//!
//! Everything goes through the same commands a user would run, so the
//! demo records pass the form rules and get store-allocated ids.

use oasis_core::types::{
    AccessStatus, MaintenanceStatus, OrderStatus, RequestStatus, ReservationStatus, RoomStatus,
    TableStatus,
};
use oasis_core::{FormInput, Money};
use tracing::info;

use crate::commands::{hotel, pool, restaurant};
use crate::error::ApiError;
use crate::state::AppState;

/// Fills every store with a small working day.
pub fn seed(app: &mut AppState) -> Result<(), ApiError> {
    seed_hotel(app)?;
    seed_restaurant(app)?;
    seed_pool(app)?;

    info!(
        rooms = app.hotel.rooms.len(),
        orders = app.restaurant.orders.len(),
        tables = app.restaurant.tables.len(),
        accesses = app.pool.accesses.len(),
        "Demo data loaded"
    );
    Ok(())
}

fn seed_hotel(app: &mut AppState) -> Result<(), ApiError> {
    let rooms = [
        ("101", "Standard", "15,000", 2, "1", "WiFi, TV, Climatisation", RoomStatus::Available),
        (
            "205",
            "Suite",
            "35,000",
            4,
            "2",
            "WiFi, TV, Climatisation, Minibar, Jacuzzi",
            RoomStatus::Occupied,
        ),
        (
            "310",
            "Deluxe",
            "25,000",
            3,
            "3",
            "WiFi, TV, Climatisation, Minibar",
            RoomStatus::Occupied,
        ),
        ("102", "Standard", "15,000", 2, "1", "WiFi, TV, Climatisation", RoomStatus::Cleaning),
    ];
    for (number, room_type, price, capacity, floor, amenities, status) in rooms {
        let input = FormInput::new()
            .text("number", number)
            .text("type", room_type)
            .text("price", price)
            .number("capacity", capacity)
            .text("floor", floor)
            .text("amenities", amenities);
        let id = hotel::create_room(&mut app.hotel, &input)?.data.id;
        hotel::set_room_status(&mut app.hotel, id, status);
    }

    let reservations = [
        (
            "Jean Kouadio",
            "+225 07 12 34 56 78",
            "jean.k@email.com",
            "205",
            "2025-10-23",
            "2025-10-25",
            2,
            ReservationStatus::Confirmed,
        ),
        (
            "Marie Diallo",
            "+225 05 98 76 54 32",
            "",
            "310",
            "2025-10-24",
            "2025-10-27",
            3,
            ReservationStatus::CheckedIn,
        ),
    ];
    for (name, phone, email, room, check_in, check_out, guests, status) in reservations {
        let input = FormInput::new()
            .text("clientName", name)
            .text("clientPhone", phone)
            .text("clientEmail", email)
            .text("roomNumber", room)
            .text("checkIn", check_in)
            .text("checkOut", check_out)
            .number("guests", guests);
        let id = hotel::create_reservation(&mut app.hotel, &app.config, &input)?
            .data
            .id;
        hotel::set_reservation_status(&mut app.hotel, id, status);
    }

    let requests = [
        (
            "205",
            "room-service",
            "Petit-déjeuner pour 2 personnes",
            "medium",
            RequestStatus::InProgress,
        ),
        ("310", "housekeeping", "Changement des serviettes", "low", RequestStatus::Pending),
        ("101", "maintenance", "Climatisation en panne", "urgent", RequestStatus::Pending),
    ];
    for (room, service_type, description, priority, status) in requests {
        let input = FormInput::new()
            .text("roomNumber", room)
            .text("serviceType", service_type)
            .text("description", description)
            .text("priority", priority);
        let id = hotel::create_service_request(&mut app.hotel, &input)?.data.id;
        hotel::set_service_request_status(&mut app.hotel, id, status);
    }

    Ok(())
}

fn seed_restaurant(app: &mut AppState) -> Result<(), ApiError> {
    let menu = [
        ("Poulet Braisé", "mains", "2,500", "Poulet grillé avec épices"),
        ("Attiéké Poisson", "mains", "1,800", "Attiéké avec poisson frit"),
        ("Riz Sauce", "mains", "1,500", "Riz avec sauce tomate"),
        ("Café Expresso", "drinks", "500", ""),
        ("Jus d'Orange Frais", "drinks", "1,000", ""),
        ("Tarte Tatin", "desserts", "1,500", ""),
        ("Omelette complète", "breakfast", "2,000", "Œufs, pain, café"),
    ];
    for (name, category, price, description) in menu {
        let input = FormInput::new()
            .text("name", name)
            .text("category", category)
            .text("price", price)
            .text("description", description);
        restaurant::create_menu_item(&mut app.restaurant, &input)?;
    }

    let orders = [
        ("table", "5", "Poulet braisé, Attiéké", "3,500", OrderStatus::Preparing),
        ("room", "204", "Petit-déjeuner complet", "5,000", OrderStatus::Preparing),
        ("bar", "Comptoir", "3 Bières, Brochettes", "4,200", OrderStatus::Ready),
        ("table", "2", "Pizza, 2 Boissons", "6,800", OrderStatus::Pending),
        ("room", "105", "Room Service - Dîner", "8,500", OrderStatus::Served),
    ];
    for (source, number, items, amount, status) in orders {
        let input = FormInput::new()
            .text("source", source)
            .text("sourceNumber", number)
            .text("items", items)
            .text("amount", amount);
        let id = restaurant::create_order(&mut app.restaurant, &input)?.data.id;
        restaurant::set_order_status(&mut app.restaurant, id, status);
    }

    let tables = [
        ("1", 4, "indoor", TableStatus::Free, None),
        ("2", 2, "indoor", TableStatus::Occupied, Some(6_800)),
        ("3", 6, "indoor", TableStatus::Reserved, None),
        ("4", 4, "terrace", TableStatus::Free, None),
        ("5", 4, "terrace", TableStatus::Occupied, Some(3_500)),
        ("6", 8, "vip", TableStatus::Free, None),
        ("7", 2, "bar", TableStatus::Cleaning, None),
    ];
    for (number, capacity, zone, status, bill) in tables {
        let input = FormInput::new()
            .text("number", number)
            .number("capacity", capacity)
            .text("zone", zone);
        let id = restaurant::create_table(&mut app.restaurant, &input)?.data.id;
        restaurant::set_table_status(&mut app.restaurant, id, status);
        if let Some(amount) = bill {
            restaurant::record_table_bill(&mut app.restaurant, id, Money::from_units(amount))?;
        }
    }

    Ok(())
}

fn seed_pool(app: &mut AppState) -> Result<(), ApiError> {
    let accesses = [
        ("Jean Kouadio", "member", "2025-10-01", "2025-12-31", 1, AccessStatus::Active),
        ("Famille Touré", "day-pass", "2025-10-23", "", 4, AccessStatus::Active),
        ("Awa Bamba", "hotel-guest", "2025-10-23", "2025-10-25", 2, AccessStatus::Pending),
    ];
    for (holder, access_type, start, end, party, status) in accesses {
        let input = FormInput::new()
            .text("holderName", holder)
            .text("accessType", access_type)
            .text("startDate", start)
            .text("endDate", end)
            .number("partySize", party);
        let id = pool::create_pool_access(&mut app.pool, &input)?.data.id;
        pool::set_pool_access_status(&mut app.pool, id, status);
    }

    let tasks = [
        (
            "cleaning",
            "Nettoyage quotidien - Surface et filtration",
            "normal",
            "2025-10-23",
            "Kouassi Jean",
            MaintenanceStatus::Done,
        ),
        (
            "chemistry",
            "Ajustement du pH",
            "high",
            "2025-10-24",
            "Yao Michel",
            MaintenanceStatus::Planned,
        ),
        (
            "equipment",
            "Vérification de la pompe",
            "urgent",
            "2025-10-24",
            "Kouassi Jean",
            MaintenanceStatus::InProgress,
        ),
    ];
    for (task_type, description, priority, scheduled, assignee, status) in tasks {
        let input = FormInput::new()
            .text("taskType", task_type)
            .text("description", description)
            .text("priority", priority)
            .text("scheduledFor", scheduled)
            .text("assignee", assignee);
        let id = pool::create_maintenance_task(&mut app.pool, &input)?.data.id;
        pool::set_maintenance_status(&mut app.pool, id, status);
    }

    let rentals = [
        ("lounger", "Jean Kouadio", 2, "Bord de piscine"),
        ("towel", "Famille Touré", 4, ""),
        ("cabana", "Awa Bamba", 1, "Cabine 3"),
    ];
    for (rental_type, client, quantity, location) in rentals {
        let input = FormInput::new()
            .text("rentalType", rental_type)
            .text("client", client)
            .number("quantity", quantity)
            .text("location", location);
        pool::create_pool_rental(&mut app.pool, &input)?;
    }

    let readings = [("7.3", "1.5", 120, "27"), ("7.4", "1.8", 125, "28")];
    for (ph, chlorine, alkalinity, temperature) in readings {
        let input = FormInput::new()
            .text("ph", ph)
            .text("chlorine", chlorine)
            .number("alkalinity", alkalinity)
            .text("temperature", temperature);
        pool::record_chemistry_reading(&mut app.pool, &input)?;
    }

    Ok(())
}
