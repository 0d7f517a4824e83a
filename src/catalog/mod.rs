//! Step catalog: the base question sequence and the pool of conditional
//! capability example pages.
//!
//! The base sequence is fixed. Conditional pages are looked up by the
//! capability the applicant selected on the capability page; capabilities with
//! no entry are skipped rather than treated as errors.

pub mod step;

pub use step::{FieldSpec, StepDefinition, StepKind};

/// Logical title of the personal information page.
pub const PERSONAL_INFO_TITLE: &str = "Kişisel Bilgilerin";
/// Logical title of the capability selection page.
pub const CAPABILITIES_TITLE: &str = "Kabiliyetlerin";
/// Logical title of the reflection page.
pub const THOUGHTS_TITLE: &str = "Düşüncelerin";
/// Logical title of the test-work confirmation page.
pub const TEST_CONFIRMATION_TITLE: &str = "Test Çalışması";

/// Capability labels offered on the capability page.
pub mod capabilities {
    pub const DESIGN: &str = "Tasarım";
    pub const SOFTWARE: &str = "Yazılım Geliştirme";
    pub const AI_TOOLS: &str = "Yapay Zeka Araçları";
    pub const CONTENT: &str = "İçerik Yazma / Üretme";
}

const EXAMPLE_OPTIONS: [&str; 3] = [
    "Yaptım / Yapabilirim",
    "Nasıl yapılacağını öğrenebilirim",
    "Bu seviyede değilim",
];

/// Static step definitions: the base sequence plus the capability lookup table.
#[derive(Debug, Clone)]
pub struct Catalog {
    base: Vec<StepDefinition>,
    conditional: Vec<(String, StepDefinition)>,
}

impl Catalog {
    /// Build a catalog from explicit parts.
    pub fn new(base: Vec<StepDefinition>, conditional: Vec<(String, StepDefinition)>) -> Self {
        Self { base, conditional }
    }

    /// The application form as it is deployed.
    pub fn reference() -> Self {
        Self::new(reference_base_steps(), reference_conditional_steps())
    }

    /// The base (non-conditional) steps, in order.
    pub fn base_steps(&self) -> &[StepDefinition] {
        &self.base
    }

    /// The example page for a capability, if one exists.
    pub fn conditional_step_for(&self, capability: &str) -> Option<&StepDefinition> {
        self.conditional
            .iter()
            .find(|(key, _)| key == capability)
            .map(|(_, step)| step)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

fn reference_base_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::info(
            "X Akademi ve Amacı",
            "X Akademi bir YKS markasıdır. <br><br> X Akademi'de koçluk ve ders materyali gibi \
             klasikleşmiş içeriklerden farklı olarak program, sistem ve net odaklı yaklaşımlar \
             sergilemeye çalışıyoruz. <br><br> 2026 YKS için de dijital ürünler, yoğunlaştırılmış \
             ders kampları ve web / mobil uygulamalar geliştirme hedeflerimiz var.",
            "Anladım",
        ),
        StepDefinition::info(
            "Başlamadan Önce...",
            "Bu bir atölye, staj, freelance veya kısa süreli / part-time kazanç süreci değil. \
             <br><br> Erken aşamada olan bir girişimin parçası olacak kişiler arıyoruz. <br><br> \
             Gerçek ürünler geliştirecek, gerçek sorumluluklar alacak ve girişimin ilgili alanında \
             söz sahibi olmak isteyen kişiler. <br><br> Sabit maaşlı değil, ortaya koyduğunuz \
             değere bağlı kazançlar elde edeceğiniz bir ortama giriyorsunuz.",
            "Anladım",
        ),
        StepDefinition::info(
            "Kimlerle Çalışıyoruz?",
            "<ul><li>Kendi kendine çalışabilen,</li><li>Netlik ve yönlendirme olmadan \
             ilerleyebilen,</li><li>Ürettiği işin arkasında duran,</li></ul> kişilerle \
             çalışıyoruz. <br><br> Eğer; <br><br> <ul><li>Sadece görev verildiğinde \
             çalışıyorsan,</li><li>İşi geliştirmek için daima yönlendirme arıyorsan,</li>\
             <li>Sorumluluğu üstüne almıyorsan,</li></ul> burası sana uygun değil.",
            "Anladım",
        ),
        StepDefinition::new(PERSONAL_INFO_TITLE, StepKind::MultiField).with_fields(vec![
            FieldSpec::new("Ad - Soyad", "fullname").with_placeholder("Adınız ve soyadınız"),
            FieldSpec::new("Telefon Numarası", "phone").with_placeholder("Örn: 0532 123 45 67"),
            FieldSpec::new("Sınıfın", "class").with_placeholder("Sınıfınız"),
            FieldSpec::new("Haftada kaç saat çalışabilirsin?", "hours")
                .with_placeholder("Örn: 10 saat"),
        ]),
        StepDefinition::new(CAPABILITIES_TITLE, StepKind::Mixed)
            .with_label("En güçlü olduğun alan hangisi?")
            .with_options([
                capabilities::DESIGN,
                capabilities::SOFTWARE,
                capabilities::AI_TOOLS,
                capabilities::CONTENT,
            ])
            .with_text_part(
                "Daha önce yaptığın bir işi paylaş:",
                "İşinizi açıklayın veya link ekleyin...",
            ),
        StepDefinition::new(THOUGHTS_TITLE, StepKind::LongText)
            .with_label("Sence girişimlerin veya ekiplerin başarısız olmasının sebebi nedir?")
            .with_placeholder("Düşüncelerinizi paylaşın..."),
        StepDefinition::info(
            TEST_CONFIRMATION_TITLE,
            "Eğer başvurun kabul edilirse senden bir test çalışması (3 - 6 saat) isteyebiliriz. \
             <br><br> Test çalışması için 48 saat teslim süremiz bulunuyor. <br><br> Müsait \
             olduğunu onaylıyor musun?",
            "Onaylıyorum",
        ),
    ]
}

fn reference_conditional_steps() -> Vec<(String, StepDefinition)> {
    vec![
        (
            capabilities::DESIGN.to_string(),
            StepDefinition::new(
                "Tasarım yeteneğinle ilgili...",
                StepKind::CapabilityExampleChoice,
            )
            .with_text(
                "Aşağıdaki resimlerde 3d mockuplar, eğitim materyali örnekleri gibi tasarımlar \
                 göreceksin. <br><br> Bu tasarımları veya benzerlerini yapabilir misin?",
            )
            .with_images(["assets/pord_mockup.jpg", "assets/booklayout.jpg"])
            .with_options(EXAMPLE_OPTIONS),
        ),
        (
            capabilities::SOFTWARE.to_string(),
            StepDefinition::new(
                "Yazılım yeteneğinle ilgili...",
                StepKind::CapabilityExampleChoice,
            )
            .with_text(
                "Aşağıdaki resimde örnek bir website tasarımı var. <br><br> Bu websiteyi ve \
                 benzerlerini yapabilir misin?",
            )
            .with_images(["assets/website_example_4.jpg"])
            .with_options(EXAMPLE_OPTIONS),
        ),
        (
            capabilities::AI_TOOLS.to_string(),
            StepDefinition::new(
                "Yapay Zeka Araçları yeteneğinle ilgili...",
                StepKind::CapabilityExampleFreeform,
            )
            .with_text(
                "Yapay zeka araçlarının şu maddeler için (biri veya birden fazlası için cevap \
                 verebilirsin) kullanımlarına örnekler ver: <br><br> <ul><li>YKS öğrencisi \
                 için</li><li>YKS içeriği üretenler için</li><li>YKS ders materyali \
                 hazırlayanlar için</li></ul>",
            )
            .with_placeholder("Örneklerinizi buraya yazın..."),
        ),
        (
            capabilities::CONTENT.to_string(),
            StepDefinition::new(
                "İçerik Yazma / Üretme yeteneğinle ilgili...",
                StepKind::CapabilityExampleMultiField,
            )
            .with_text("YouTube kanalımızda yayınlanacak bir YKS videosu hazırladığını düşünelim.")
            .with_fields(vec![
                FieldSpec::new("Videoya bir başlık ver:", "video-title"),
                FieldSpec::new("Videonun küçük resmini tarif et:", "video-thumbnail"),
                FieldSpec::new("Videonun giriş cümlesi:", "video-intro"),
                FieldSpec::new("Videonun aktardığı fikirler (1 - 4 adet):", "video-ideas"),
            ]),
        ),
    ]
}
