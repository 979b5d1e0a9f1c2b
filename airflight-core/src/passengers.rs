use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rand::Rng;

use crate::model::{Gender, NewPassenger};

const FAMILY_PROBABILITY: f64 = 0.3;

fn phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..10)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

fn mail(name: &str, surname: &str) -> String {
    let clean = |s: &str| -> String {
        s.chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect()
    };
    format!("{}.{}@mail.com", clean(name), clean(surname))
}

fn passenger<R: Rng + ?Sized>(rng: &mut R, surname: String, group: usize) -> NewPassenger {
    let gender = if rng.gen_bool(0.5) {
        Gender::Male
    } else {
        Gender::Female
    };
    let name: String = FirstName().fake_with_rng(rng);

    NewPassenger {
        mail: mail(&name, &surname),
        phone_number: phone_number(rng),
        name,
        surname,
        gender,
        group,
        ticket_price_dollar: None,
        purchase_date: None,
    }
}

fn single<R: Rng + ?Sized>(rng: &mut R, group: usize) -> NewPassenger {
    let surname: String = LastName().fake_with_rng(rng);
    passenger(rng, surname, group)
}

/// Exactly `count` passengers, about 30% of draws being families of 2 to 5
/// sharing a surname.
pub fn generate_passengers<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<NewPassenger> {
    let mut passengers = Vec::with_capacity(count);
    let mut group = 0;

    while passengers.len() < count {
        if rng.gen_bool(FAMILY_PROBABILITY) {
            let size = rng.gen_range(2..=5);
            if passengers.len() + size <= count {
                let surname: String = LastName().fake_with_rng(rng);
                for _ in 0..size {
                    passengers.push(passenger(rng, surname.clone(), group));
                }
            } else {
                passengers.push(single(rng, group));
            }
        } else {
            passengers.push(single(rng, group));
        }
        group += 1;
    }

    passengers
}
