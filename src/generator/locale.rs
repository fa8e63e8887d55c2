// src/generator/locale.rs
//! Word lists backing the fake user generator.

/// Static vocabulary for one locale. `#` in a phone format is replaced by a digit.
#[derive(Debug)]
pub struct Locale {
    pub code:          &'static str,
    pub first_names:   &'static [&'static str],
    /// ASCII spellings used to build the local part of e-mail addresses
    pub email_names:   &'static [&'static str],
    pub countries:     &'static [&'static str],
    pub email_domains: &'static [&'static str],
    pub phone_formats: &'static [&'static str],
}

pub static EN_US: Locale = Locale {
    code: "en_US",
    first_names: &[
        "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
        "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
        "Thomas", "Sarah", "Christopher", "Karen", "Daniel", "Lisa", "Matthew", "Nancy",
        "Anthony", "Betty", "Mark", "Sandra", "Donald", "Ashley", "Steven", "Kimberly",
        "Andrew", "Emily", "Joshua", "Donna", "Kevin", "Michelle", "Brian", "Carol",
    ],
    email_names: &[
        "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis",
        "rodriguez", "martinez", "hernandez", "lopez", "wilson", "anderson", "thomas",
        "taylor", "moore", "jackson", "martin", "lee", "thompson", "white", "harris",
        "clark", "lewis", "robinson", "walker", "young", "allen", "king",
    ],
    countries: &[
        "Afghanistan", "Argentina", "Australia", "Austria", "Belgium", "Brazil", "Canada",
        "Chile", "China", "Colombia", "Denmark", "Egypt", "Finland", "France", "Germany",
        "Greece", "India", "Indonesia", "Ireland", "Italy", "Japan", "Kenya", "Mexico",
        "Netherlands", "New Zealand", "Nigeria", "Norway", "Peru", "Poland", "Portugal",
        "South Africa", "Spain", "Sweden", "Switzerland", "Thailand", "Turkey",
        "United Kingdom", "United States of America", "Vietnam", "Zambia",
    ],
    email_domains: &["example.com", "example.org", "example.net", "gmail.com", "yahoo.com", "hotmail.com"],
    phone_formats: &[
        "###-###-####", "(###)###-####", "###.###.####", "+1-###-###-####", "001-###-###-####x###",
    ],
};

pub static RU_RU: Locale = Locale {
    code: "ru_RU",
    first_names: &[
        "Александр", "Мария", "Дмитрий", "Анна", "Сергей", "Елена", "Андрей", "Ольга",
        "Алексей", "Татьяна", "Иван", "Наталья", "Михаил", "Ирина", "Николай", "Светлана",
        "Владимир", "Екатерина", "Павел", "Юлия", "Евгений", "Галина", "Олег", "Марина",
    ],
    email_names: &[
        "ivanov", "smirnov", "kuznetsov", "popov", "vasiliev", "petrov", "sokolov",
        "mikhailov", "novikov", "fedorov", "morozov", "volkov", "alekseev", "lebedev",
        "semenov", "egorov", "pavlov", "kozlov", "stepanov", "nikolaev",
    ],
    countries: &[
        "Австралия", "Австрия", "Азербайджан", "Армения", "Беларусь", "Бельгия", "Болгария",
        "Бразилия", "Германия", "Греция", "Грузия", "Египет", "Индия", "Испания", "Италия",
        "Казахстан", "Канада", "Киргизия", "Китай", "Латвия", "Литва", "Мексика", "Молдова",
        "Норвегия", "Польша", "Россия", "Сербия", "Таджикистан", "Турция", "Узбекистан",
        "Украина", "Финляндия", "Франция", "Чехия", "Швеция", "Эстония", "Япония",
    ],
    email_domains: &["example.com", "example.org", "example.net", "mail.ru", "yandex.ru", "rambler.ru"],
    phone_formats: &["+7 ### ### ## ##", "+7 (###) ###-##-##", "8 ### ###-##-##", "8 (###) ###-####"],
};

static ALL: [&Locale; 2] = [&EN_US, &RU_RU];

/// Look up a locale by code; `-` and `_` separators are both accepted.
pub fn find(code: &str) -> Option<&'static Locale> {
    let wanted = code.replace('-', "_");
    ALL.iter().copied().find(|l| l.code.eq_ignore_ascii_case(&wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_accepts_both_separators() {
        assert_eq!(find("en_US").map(|l| l.code), Some("en_US"));
        assert_eq!(find("ru-ru").map(|l| l.code), Some("ru_RU"));
        assert!(find("xx_YY").is_none());
    }

    #[test]
    fn every_list_is_populated() {
        for locale in ALL {
            assert!(!locale.first_names.is_empty(), "{}", locale.code);
            assert!(!locale.email_names.is_empty(), "{}", locale.code);
            assert!(!locale.countries.is_empty(), "{}", locale.code);
            assert!(!locale.email_domains.is_empty(), "{}", locale.code);
            assert!(locale.phone_formats.iter().all(|f| f.contains('#')), "{}", locale.code);
            assert!(locale.email_names.iter().all(|n| n.is_ascii()), "{}", locale.code);
        }
    }
}
