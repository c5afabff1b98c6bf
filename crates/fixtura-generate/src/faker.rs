use fake::Fake;
use fake::faker::internet::{en as internet_en, pt_br as internet_pt_br};
use fake::faker::name::{en as name_en, pt_br as name_pt_br};
use fake::faker::phone_number::{en as phone_en, pt_br as phone_pt_br};
use rand::Rng;

use crate::locales::LocaleKey;

/// Locale-aware access to the `fake` providers used for customers.
#[derive(Debug, Clone, Copy)]
pub struct PersonaFaker {
    locale: LocaleKey,
}

impl PersonaFaker {
    pub fn new(locale: LocaleKey) -> Self {
        Self { locale }
    }

    pub fn first_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => name_en::FirstName().fake_with_rng(rng),
            LocaleKey::PtBr => name_pt_br::FirstName().fake_with_rng(rng),
        }
    }

    pub fn last_name<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => name_en::LastName().fake_with_rng(rng),
            LocaleKey::PtBr => name_pt_br::LastName().fake_with_rng(rng),
        }
    }

    pub fn phone_number<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => phone_en::PhoneNumber().fake_with_rng(rng),
            LocaleKey::PtBr => phone_pt_br::PhoneNumber().fake_with_rng(rng),
        }
    }

    pub fn free_email_domain<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self.locale {
            LocaleKey::EnUs => internet_en::FreeEmailProvider().fake_with_rng(rng),
            LocaleKey::PtBr => internet_pt_br::FreeEmailProvider().fake_with_rng(rng),
        }
    }
}

/// Lowercase a name and keep only alphanumeric characters, for email local parts.
pub fn email_slug(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Truncate to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn email_slug_strips_spaces_and_punctuation() {
        assert_eq!(email_slug("O'Connor"), "oconnor");
        assert_eq!(email_slug("Mary Ann"), "maryann");
        assert_eq!(email_slug("João"), "joão");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("ñandú", 3), "ñan");
        assert_eq!(truncate_chars("123", 15), "123");
    }

    #[test]
    fn providers_return_text_for_every_locale() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for locale in LocaleKey::ALL {
            let faker = PersonaFaker::new(locale);
            assert!(!faker.first_name(&mut rng).is_empty());
            assert!(!faker.last_name(&mut rng).is_empty());
            assert!(!faker.phone_number(&mut rng).is_empty());
            assert!(faker.free_email_domain(&mut rng).contains('.'));
        }
    }
}
